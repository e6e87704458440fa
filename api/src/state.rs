use code_runner::HttpCodeExecutor;
use db::SeaOrmLabStore;
use marker::feedback::ai_assessment::GeminiAssessor;
use marker::submission::SubmissionService;
use marker::traits::assessor::Assessor;
use marker::traits::executor::CodeExecutor;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Shared handles for every request: the database connection and the grading service.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    submissions: Arc<SubmissionService<SeaOrmLabStore>>,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        executor: Arc<dyn CodeExecutor>,
        assessor: Option<Arc<dyn Assessor>>,
    ) -> Self {
        let store = Arc::new(SeaOrmLabStore::new(db.clone()));
        let submissions = SubmissionService::new(store, executor).with_assessor(assessor);
        Self {
            db,
            submissions: Arc::new(submissions),
        }
    }

    /// Wires the HTTP code runner and, when an API key is configured, the Gemini assessor.
    pub fn from_config(db: DatabaseConnection) -> Self {
        let executor: Arc<dyn CodeExecutor> = Arc::new(HttpCodeExecutor::from_config());
        let assessor = GeminiAssessor::from_config().map(|a| Arc::new(a) as Arc<dyn Assessor>);
        Self::new(db, executor, assessor)
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn submissions(&self) -> &SubmissionService<SeaOrmLabStore> {
        &self.submissions
    }
}
