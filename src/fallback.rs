use crate::prediction::Prediction;
use chrono::{TimeZone, Utc};

/// Canned records substituted when the inference backend is unreachable.
///
/// The catalog is injected into the client at construction time so tests
/// can swap the records; the defaults mirror the demo data the product
/// ships with. Records never carry a live `image_url`.
#[derive(Debug, Clone)]
pub struct FallbackCatalog {
    last_inference: Prediction,
    history: Vec<Prediction>,
    upload_label: String,
    upload_confidence: f64,
    upload_severity: String,
}

impl FallbackCatalog {
    pub fn new(
        last_inference: Prediction,
        history: Vec<Prediction>,
        upload_label: String,
        upload_confidence: f64,
        upload_severity: String,
    ) -> Self {
        Self {
            last_inference,
            history,
            upload_label,
            upload_confidence,
            upload_severity,
        }
    }

    /// The healthy-scan substitute, stamped with the current time so it
    /// always reads as a fresh scan.
    pub fn last_inference(&self) -> Prediction {
        Prediction {
            timestamp: Utc::now(),
            ..self.last_inference.clone()
        }
    }

    /// The canned history, most recent first, with its fixed historical
    /// timestamps intact.
    pub fn history(&self) -> Vec<Prediction> {
        self.history.clone()
    }

    /// A substitute upload result carrying the caller's filename and a
    /// time-based id, stamped at call time.
    pub fn upload(&self, filename: &str) -> Prediction {
        let now = Utc::now();
        Prediction {
            id: Some(now.timestamp_millis()),
            filename: Some(filename.to_string()),
            prediction: self.upload_label.clone(),
            confidence: self.upload_confidence,
            severity: Some(self.upload_severity.clone()),
            timestamp: now,
            image_url: None,
        }
    }
}

impl Default for FallbackCatalog {
    fn default() -> Self {
        let last_inference = Prediction {
            id: Some(1),
            filename: Some("healthy2.jpg".to_string()),
            prediction: "Healthy".to_string(),
            confidence: 99.95,
            severity: Some("low".to_string()),
            timestamp: Utc::now(),
            image_url: None,
        };

        let history = vec![
            canned_scan(17, "healthy2.jpg", "Healthy", 99.95, (14, 58, 50)),
            canned_scan(16, "healthy3_2.jpg", "Healthy", 87.03, (14, 58, 40)),
            canned_scan(15, "cocci640.jpg", "Healthy", 98.63, (14, 46, 22)),
            canned_scan(14, "cocci633.jpg", "Healthy", 99.56, (14, 45, 29)),
            canned_scan(
                13,
                "cocci620.jpg",
                "Newcastle Disease (NCD)",
                57.47,
                (14, 45, 4),
            ),
        ];

        Self {
            last_inference,
            history,
            upload_label: "Coccidiosis".to_string(),
            upload_confidence: 89.5,
            upload_severity: "medium".to_string(),
        }
    }
}

fn canned_scan(
    id: i64,
    filename: &str,
    label: &str,
    confidence: f64,
    (hour, min, sec): (u32, u32, u32),
) -> Prediction {
    Prediction {
        id: Some(id),
        filename: Some(filename.to_string()),
        prediction: label.to_string(),
        confidence,
        severity: None,
        timestamp: Utc
            .with_ymd_and_hms(2025, 1, 9, hour, min, sec)
            .unwrap(),
        image_url: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_last_inference_literal() {
        let catalog = FallbackCatalog::default();
        let scan = catalog.last_inference();

        assert_eq!(scan.filename.as_deref(), Some("healthy2.jpg"));
        assert_eq!(scan.prediction, "Healthy");
        assert_eq!(scan.confidence, 99.95);
        assert_eq!(scan.severity.as_deref(), Some("low"));
        assert!(Utc::now() - scan.timestamp < Duration::seconds(1));
    }

    #[test]
    fn test_history_ids_descend() {
        let history = FallbackCatalog::default().history();

        let ids: Vec<i64> = history.iter().filter_map(|scan| scan.id).collect();
        assert_eq!(ids, vec![17, 16, 15, 14, 13]);

        let oldest = history.last().unwrap();
        assert_eq!(oldest.prediction, "Newcastle Disease (NCD)");
        assert_eq!(oldest.confidence, 57.47);
        assert_eq!(oldest.timestamp.to_rfc3339(), "2025-01-09T14:45:04+00:00");
    }

    #[test]
    fn test_upload_copies_filename() {
        let catalog = FallbackCatalog::default();
        let scan = catalog.upload("sick_hen.jpg");

        assert_eq!(scan.filename.as_deref(), Some("sick_hen.jpg"));
        assert_eq!(scan.prediction, "Coccidiosis");
        assert_eq!(scan.confidence, 89.5);
        assert_eq!(scan.severity.as_deref(), Some("medium"));
        assert_eq!(scan.id, Some(scan.timestamp.timestamp_millis()));
    }

    #[test]
    fn test_confidence_stays_in_percentage_range() {
        let catalog = FallbackCatalog::default();

        let mut scans = catalog.history();
        scans.push(catalog.last_inference());
        scans.push(catalog.upload("any.jpg"));

        for scan in scans {
            assert!((0.0..=100.0).contains(&scan.confidence));
        }
    }
}
