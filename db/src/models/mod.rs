pub mod assigned_challenge;
pub mod lab_challenge;
pub mod late_submission_grant;
pub mod student;
pub mod student_lab_attempt;
pub mod target_code;

pub use assigned_challenge::Entity as AssignedChallenge;
pub use lab_challenge::Entity as LabChallenge;
pub use late_submission_grant::Entity as LateSubmissionGrant;
pub use student::Entity as Student;
pub use student_lab_attempt::Entity as StudentLabAttempt;
pub use target_code::Entity as TargetCode;
