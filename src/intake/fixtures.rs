//! Sample webhook payloads for tests.

use serde_json::{json, Value};

use super::payload::FormSubmission;

/// Answers of a fully filled intake form.
pub fn complete_answers() -> Value {
    let front = json!({ "name": "card-front.jpg", "url": "https://files.example.org/u/1/card-front.jpg" });
    let back = json!({ "name": "card-back.jpg", "url": "https://files.example.org/u/1/card-back.jpg" });
    json!({
        "q18_patientName": { "prefix": "Ms.", "first": "Ana", "last": "Lopez" },
        "q90_dateOf90": { "month": "03", "day": "09", "year": "2012" },
        "q75_gender75": "Female",
        "q74_age": "12",
        "q64_parentName": { "first": "Maria", "last": "Lopez" },
        "q35_email": "maria.lopez@example.org",
        "q37_preferredContact": "Email",
        "q76_areYou76": "No",
        "q77_doYou77": "Yes",
        "q48_datesAvailable": { "month": "07", "day": "01", "year": "2024" },
        "q78_areYou": "Yes",
        "q70_If": "Spanish",
        "q50_typeA": "Medicaid",
        "q53_howDid": "Physician",
        "q67_For67": { "first": "Paul", "last": "Okafor" },
        "q25_permanentStreet": {
            "addr_line1": "4 Calle Real", "addr_line2": "", "city": "Tegucigalpa",
            "state": "Francisco Morazan", "postal": "11101", "country": "Honduras"
        },
        "q26_temporaryStreet": {
            "addr_line1": "12 Harbor Way", "addr_line2": "Apt 4", "city": "Boston",
            "state": "MA", "postal": "02110", "country": "United States"
        },
        "q27_phoneNumber": { "area": "617", "phone": "5550142", "full": "(617) 555-0142" },
        "q33_phoneNumber33": "Mobile",
        "q32_phoneNumber32": { "area": "504", "phone": "22220000", "full": "(504) 2222-0000" },
        "q34_phoneNumber34": "Home",
        "q83_typeA83": { "value": front.to_string() },
        "q84_typeA84": { "value": back.to_string() },
        "q59_intakeDate": { "month": "05", "day": "02", "year": "2024" },
        "q60_intakeBy": { "first": "Sam", "last": "Reyes" },
        "q62_liason": { "first": "Dee", "last": "Park" }
    })
}

pub fn submission_with(answers: &Value, submission_id: &str) -> FormSubmission {
    FormSubmission {
        form_id: Some("231234567890".into()),
        submission_id: Some(submission_id.into()),
        form_title: Some("New Patient Intake".into()),
        raw_request: Some(answers.to_string()),
    }
}

pub fn complete_submission() -> FormSubmission {
    submission_with(&complete_answers(), "5790000000001")
}
