use std::sync::Arc;
use tempfile::TempDir;
use test_context::AsyncTestContext;
use tokio::net::TcpListener;
use voxbridge::controllers::pipeline::PipelineController;
use voxbridge::domain::pipeline::{PipelineService, PipelineSettings};
use voxbridge::domain::translation::TranslationInvoker;
use voxbridge::domain::voice::{EngineCache, VoiceLocator};
use voxbridge::infrastructure::http::create_router;

pub mod assertions;
pub mod engines;
pub mod fixtures;

use api_client::TestClient;
use engines::{FakeTranslationEngine, FakeTtsFactory};
use fixtures::VoiceFixtures;

pub struct TestContext {
    pub client: TestClient,
    #[allow(dead_code)]
    pub translation: Arc<FakeTranslationEngine>,
    #[allow(dead_code)]
    pub tts: Arc<FakeTtsFactory>,
    #[allow(dead_code)]
    pub voices: VoiceFixtures,
    _voice_root: TempDir,
}

impl TestContext {
    /// Boot a server with Bengali (mms) and Spanish (piper) voices installed
    pub async fn start(translation: FakeTranslationEngine, tts: FakeTtsFactory) -> Self {
        let voice_root = TempDir::new().expect("Failed to create voice root");
        let voices = VoiceFixtures::new(voice_root.path());
        voices.install_mms("ben");
        voices.install_piper("es_ES", "davefx");

        let translation = Arc::new(translation);
        let tts = Arc::new(tts);

        let locator = Arc::new(VoiceLocator::new(voice_root.path()));
        let engine_cache = Arc::new(EngineCache::new(locator, tts.clone()));
        let pipeline_service = Arc::new(PipelineService::new(
            TranslationInvoker::new(translation.clone()),
            engine_cache,
            PipelineSettings::default(),
        ));
        let pipeline_controller = Arc::new(PipelineController::new(pipeline_service.clone()));
        let settings = PipelineSettings::default();
        let app = create_router(pipeline_service, pipeline_controller, settings.max_audio_bytes);

        // Start server
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind listener");
        let addr = listener.local_addr().expect("Failed to get local addr");
        let base_url = format!("http://{}", addr);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Wait for server to be ready
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        Self {
            client: TestClient::new(&base_url),
            translation,
            tts,
            voices,
            _voice_root: voice_root,
        }
    }
}

impl AsyncTestContext for TestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async { Self::start(FakeTranslationEngine::default(), FakeTtsFactory::default()).await }
    }

    fn teardown(self) -> impl std::future::Future<Output = ()> + Send {
        async {
            // Voice root is removed when the TempDir drops
        }
    }
}
