use std::sync::Arc;

use storage::store::RemoteStore;

use crate::Clock;
use crate::ai::AiClient;
use crate::dashboard_service::DashboardService;
use crate::quiz_service::QuizService;

/// Assembles the app-facing services around one store and one AI client.
#[derive(Clone)]
pub struct AppServices {
    store: Arc<RemoteStore>,
    ai: Arc<AiClient>,
    quiz: Arc<QuizService>,
    dashboard: Arc<DashboardService>,
}

impl AppServices {
    /// Build services from environment configuration.
    ///
    /// Unset or placeholder backend settings leave the store on its
    /// substitute collections; a missing AI key leaves generation on the
    /// built-in fallbacks. Construction never fails.
    #[must_use]
    pub fn from_env(clock: Clock) -> Self {
        Self::new(clock, RemoteStore::from_env(clock), AiClient::from_env())
    }

    #[must_use]
    pub fn new(clock: Clock, store: RemoteStore, ai: AiClient) -> Self {
        let store = Arc::new(store);
        let ai = Arc::new(ai);
        let quiz = Arc::new(QuizService::new(clock, Arc::clone(&store), Arc::clone(&ai)));
        let dashboard = Arc::new(DashboardService::new(Arc::clone(&store)));

        Self {
            store,
            ai,
            quiz,
            dashboard,
        }
    }

    #[must_use]
    pub fn store(&self) -> Arc<RemoteStore> {
        Arc::clone(&self.store)
    }

    #[must_use]
    pub fn ai(&self) -> Arc<AiClient> {
        Arc::clone(&self.ai)
    }

    #[must_use]
    pub fn quiz(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }

    #[must_use]
    pub fn dashboard(&self) -> Arc<DashboardService> {
        Arc::clone(&self.dashboard)
    }

    /// Whether a real document backend is configured.
    #[must_use]
    pub fn is_backend_configured(&self) -> bool {
        self.store.is_configured()
    }

    /// Whether generative features are configured.
    #[must_use]
    pub fn ai_enabled(&self) -> bool {
        self.ai.enabled()
    }
}
