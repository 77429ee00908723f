use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Counts come back from SQL aggregates and may be encoded as floats.
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CaseStatistics {
    #[serde(default, deserialize_with = "count")]
    pub total_cases: u64,
    #[serde(default, deserialize_with = "count")]
    pub active_cases: u64,
    #[serde(default, deserialize_with = "count")]
    pub pending_cases: u64,
    #[serde(default, deserialize_with = "count")]
    pub closed_cases: u64,
}

fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value.map(|v| v.max(0.0).round() as u64).unwrap_or_default())
}

fn amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}

/// Empty text columns come back as `null`.
fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpcomingHearing {
    pub name: String,
    pub case: String,
    #[serde(default, deserialize_with = "text")]
    pub case_title: String,
    #[serde(default)]
    pub court: Option<String>,
    pub hearing_date: NaiveDate,
    #[serde(default)]
    pub hearing_time: Option<String>,
    #[serde(default)]
    pub judge: Option<String>,
    #[serde(default)]
    pub hearing_type: Option<String>,
}

/// The server has already formatted `timestamp` for display.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentActivity {
    #[serde(default, deserialize_with = "text")]
    pub activity: String,
    #[serde(default, deserialize_with = "text")]
    pub description: String,
    #[serde(default, deserialize_with = "text")]
    pub case_title: String,
    #[serde(default, deserialize_with = "text")]
    pub timestamp: String,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegalService {
    pub name: String,
    #[serde(default, deserialize_with = "text")]
    pub service_name: String,
    #[serde(default, deserialize_with = "text")]
    pub description: String,
    #[serde(default, deserialize_with = "amount")]
    pub price: f64,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRequestSummary {
    pub name: String,
    pub service: String,
    #[serde(default, deserialize_with = "text")]
    pub service_name: String,
    #[serde(default, deserialize_with = "text")]
    pub description: String,
    #[serde(default, deserialize_with = "text")]
    pub status: String,
    #[serde(default)]
    pub request_date: Option<NaiveDate>,
    #[serde(default)]
    pub preferred_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn case_statistics_accepts_float_and_null_counts() {
        let stats: CaseStatistics = serde_json::from_value(json!({
            "total_cases": 12.0,
            "active_cases": 7,
            "pending_cases": null
        }))
        .unwrap();

        assert_eq!(
            stats,
            CaseStatistics {
                total_cases: 12,
                active_cases: 7,
                pending_cases: 0,
                closed_cases: 0,
            }
        );
    }

    #[test]
    fn null_text_columns_decode_as_empty() {
        let request: ServiceRequestSummary = serde_json::from_value(json!({
            "name": "SR-0007",
            "service": "LS-0002",
            "service_name": null,
            "description": null,
            "status": "Submitted",
            "request_date": "2024-06-01",
            "preferred_date": null
        }))
        .unwrap();
        assert_eq!(request.service_name, "");
        assert_eq!(request.description, "");
        assert_eq!(request.preferred_date, None);

        let service: LegalService = serde_json::from_value(json!({
            "name": "LS-0002",
            "service_name": "Will Drafting",
            "description": null,
            "price": null,
            "duration": null,
            "category": null
        }))
        .unwrap();
        assert_eq!(service.description, "");
        assert_eq!(service.price, 0.0);

        let activity: RecentActivity = serde_json::from_value(json!({
            "activity": "Document Filed",
            "description": null,
            "case_title": null,
            "timestamp": "2 hours ago"
        }))
        .unwrap();
        assert_eq!(activity.description, "");
        assert_eq!(activity.case_title, "");

        let hearing: UpcomingHearing = serde_json::from_value(json!({
            "name": "HRG-0009",
            "case": "CASE-0003",
            "case_title": null,
            "court": null,
            "hearing_date": "2024-06-10",
            "hearing_time": null
        }))
        .unwrap();
        assert_eq!(hearing.case_title, "");
        assert_eq!(hearing.court, None);
    }

    #[test]
    fn upcoming_hearing_tolerates_missing_optional_fields() {
        let hearing: UpcomingHearing = serde_json::from_value(json!({
            "name": "HRG-0004",
            "case": "CASE-0001",
            "case_title": "Wanjiru v. Otieno",
            "hearing_date": "2024-05-02"
        }))
        .unwrap();

        assert_eq!(hearing.court, None);
        assert_eq!(
            hearing.hearing_date,
            NaiveDate::from_ymd_opt(2024, 5, 2).unwrap()
        );
    }
}
