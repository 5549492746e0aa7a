//! Question identifiers of the intake form.

pub const RAW_REQUEST: &str = "rawRequest";

pub const PATIENT_NAME: &str = "q18_patientName";
pub const DATE_OF_BIRTH: &str = "q90_dateOf90";
pub const GENDER: &str = "q75_gender75";
pub const AGE: &str = "q74_age";
pub const PARENT_NAME: &str = "q64_parentName";
pub const EMAIL: &str = "q35_email";
pub const PREFERRED_CONTACT: &str = "q37_preferredContact";
pub const IS_US_CITIZEN: &str = "q76_areYou76";
pub const NEED_VISA: &str = "q77_doYou77";
pub const DATES_AVAILABLE: &str = "q48_datesAvailable";
pub const NEED_INTERPRETER: &str = "q78_areYou";
pub const LANGUAGE: &str = "q70_If";
pub const COVERAGE_TYPE: &str = "q50_typeA";
pub const REFERRAL_TYPE: &str = "q53_howDid";
pub const REFERRAL_NAME: &str = "q67_For67";

pub const PERMANENT_ADDRESS: &str = "q25_permanentStreet";
pub const TEMPORARY_ADDRESS: &str = "q26_temporaryStreet";

pub const PHONE_1: &str = "q27_phoneNumber";
pub const PHONE_1_TYPE: &str = "q33_phoneNumber33";
pub const PHONE_2: &str = "q32_phoneNumber32";
pub const PHONE_2_TYPE: &str = "q34_phoneNumber34";

pub const INSURANCE_CARD_FRONT: &str = "q83_typeA83";
pub const INSURANCE_CARD_BACK: &str = "q84_typeA84";

pub const INTAKE_DATE: &str = "q59_intakeDate";
pub const INTAKE_BY: &str = "q60_intakeBy";
pub const LIAISON: &str = "q62_liason";

// Sub-object keys
pub const PREFIX: &str = "prefix";
pub const FIRST: &str = "first";
pub const LAST: &str = "last";
pub const MONTH: &str = "month";
pub const DAY: &str = "day";
pub const YEAR: &str = "year";
pub const ADDR_LINE_1: &str = "addr_line1";
pub const ADDR_LINE_2: &str = "addr_line2";
pub const CITY: &str = "city";
pub const STATE: &str = "state";
pub const POSTAL: &str = "postal";
pub const COUNTRY: &str = "country";
pub const FULL: &str = "full";
pub const VALUE: &str = "value";

/// Literal marking a checked Yes/No question.
pub const YES: &str = "Yes";
