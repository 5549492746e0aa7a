use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: i64,
    pub prefix: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    pub age: i64,
    pub parent_first_name: Option<String>,
    pub parent_last_name: Option<String>,
    pub email: Option<String>,
    pub is_us_citizen: bool,
    pub need_visa: Option<bool>,
    pub dates_available: Option<NaiveDate>,
    pub need_interpretor: bool,
    pub referral_first_name: Option<String>,
    pub referral_last_name: Option<String>,
    pub preferred_contact_id: i64,
    pub language_id: Option<i64>,
    pub coverage_type_id: Option<i64>,
    pub referral_type_id: Option<i64>,
    pub permanent_address_id: Option<i64>,
    pub temporary_address_id: Option<i64>,
    pub phone_1_id: Option<i64>,
    pub phone_2_id: Option<i64>,
    pub insurance_card_front_id: Option<i64>,
    pub insurance_card_back_id: Option<i64>,
}
