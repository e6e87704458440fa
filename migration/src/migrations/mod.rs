pub mod m202510010001_create_lab_challenges;
pub mod m202510010002_create_target_codes;
pub mod m202510010003_create_students;
pub mod m202510010004_create_assigned_challenges;
pub mod m202510010005_create_student_lab_attempts;
pub mod m202510010006_create_late_submission_grants;
