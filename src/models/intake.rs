use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One processed form submission, linked to the patient it created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intake {
    pub id: i64,
    pub intake_date: Option<NaiveDate>,
    pub intake_by_first_name: Option<String>,
    pub intake_by_last_name: Option<String>,
    pub liason_first_name: Option<String>,
    pub liason_last_name: Option<String>,
    pub patient_id: Option<i64>,
    pub form_id: Option<String>,
    pub submission_id: Option<String>,
    pub form_title: Option<String>,
}
