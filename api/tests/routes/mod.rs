mod assignments_test;
mod challenges_test;
mod health_test;
mod late_submissions_test;
mod submissions_test;
