use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tracing::info;

use crate::acquire::{AcquirerFactory, TextAcquirer};
use crate::config::Config;
use crate::error::Result;
use crate::llm::{CompletionService, OpenAiClient};
use crate::media::{MediaProcessorFactory, MediaProcessorTrait};
use crate::subtitle::{artifact_path, compose_bilingual, write_artifact};
use crate::translate::ChunkedTranslator;

pub struct Workflow {
    config: Config,
    acquirer: Box<dyn TextAcquirer>,
    translator: ChunkedTranslator,
}

impl Workflow {
    /// Build the pipeline from configuration and check the external tools
    pub async fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let client = Arc::new(OpenAiClient::new(&config.openai, config.api_key()?)?);
        let media: Arc<dyn MediaProcessorTrait> =
            MediaProcessorFactory::create_processor(config.acquire.clone()).into();

        // Check dependencies
        media.check_availability().await?;

        let acquirer = AcquirerFactory::create_acquirer(config.acquire.clone(), media, client.clone());
        Ok(Self::with_components(config, acquirer, client))
    }

    /// Build the pipeline around an existing acquirer and completion service
    pub fn with_components(
        config: Config,
        acquirer: Box<dyn TextAcquirer>,
        completion: Arc<dyn CompletionService>,
    ) -> Self {
        let translator = ChunkedTranslator::new(completion, &config.translate);
        Self {
            config,
            acquirer,
            translator,
        }
    }

    /// Acquire, translate, compose, and write the bilingual artifact for one video
    pub async fn run(&self, url: &str) -> Result<PathBuf> {
        let output_dir = &self.config.output.dir;
        let target_language = &self.config.translate.target_language;
        info!("Processing {} ({:?} mode)", url, self.acquirer.mode());

        // Step 1: Output directory
        fs::create_dir_all(output_dir).await?;

        // Step 2: Source text
        let acquisition = self.acquirer.acquire(url, output_dir).await?;

        // Step 3: Translation
        info!("Translating subtitles into {}...", target_language);
        let translated = self.translator.translate(&acquisition.text, target_language).await?;

        // Step 4: Bilingual artifact
        let artifact = compose_bilingual(&acquisition.text, &translated);
        let output_path = artifact_path(
            output_dir,
            &acquisition.video_id,
            acquisition.mode,
            &self.config.translate.target_code,
        );
        write_artifact(&artifact, &output_path).await?;

        info!("Bilingual subtitles saved to: {}", output_path.display());
        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::acquire::{Acquisition, VideoId};
    use crate::config::AcquisitionMode;
    use crate::error::BisubError;

    const TRANSCRIPT: &str = "Hello world\nThis is a test line that is quite long";

    struct StubAcquirer {
        mode: AcquisitionMode,
    }

    #[async_trait]
    impl TextAcquirer for StubAcquirer {
        async fn acquire(&self, url: &str, _output_dir: &Path) -> Result<Acquisition> {
            Ok(Acquisition {
                video_id: VideoId::from_url(url)?,
                text: TRANSCRIPT.to_string(),
                source_path: None,
                mode: self.mode,
            })
        }

        fn mode(&self) -> AcquisitionMode {
            self.mode
        }
    }

    /// Reverses each chunk; optionally fails on the n-th call (1-based)
    struct ReversingService {
        calls: AtomicUsize,
        fail_on: Option<usize>,
    }

    impl ReversingService {
        fn new(fail_on: Option<usize>) -> Self {
            Self { calls: AtomicUsize::new(0), fail_on }
        }
    }

    #[async_trait]
    impl CompletionService for ReversingService {
        async fn complete(&self, _system_prompt: &str, user_prompt: &str) -> Result<String> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if self.fail_on == Some(call) {
                return Err(BisubError::Translation("connection reset".to_string()));
            }
            let chunk = user_prompt
                .split_once("without skipping any parts:\n\n")
                .map(|(_, chunk)| chunk)
                .unwrap_or_default();
            Ok(chunk.chars().rev().collect())
        }
    }

    fn workflow(dir: &Path, mode: AcquisitionMode, service: Arc<ReversingService>) -> Workflow {
        let mut config = Config::default();
        config.output.dir = dir.to_path_buf();
        config.translate.chunk_size = 20;
        config.acquire.mode = mode;
        Workflow::with_components(config, Box::new(StubAcquirer { mode }), service)
    }

    #[tokio::test]
    async fn test_end_to_end_bilingual_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().join("downloads");
        let service = Arc::new(ReversingService::new(None));
        let workflow = workflow(&output_dir, AcquisitionMode::Subtitles, service.clone());

        let path = workflow
            .run("https://www.youtube.com/watch?v=BdfsuRS8UfA")
            .await
            .unwrap();

        assert_eq!(path, output_dir.join("BdfsuRS8UfA.cn.vtt"));
        assert_eq!(service.calls.load(Ordering::SeqCst), 2);

        let expected = format!(
            "{}\n\n{}\n{}",
            TRANSCRIPT,
            "dlrow olleH",
            "gnol etiuq si taht enil tset a si sihT"
        );
        assert_eq!(std::fs::read_to_string(&path).unwrap(), expected);
    }

    #[tokio::test]
    async fn test_transcription_mode_output_name() {
        let dir = tempfile::tempdir().unwrap();
        let service = Arc::new(ReversingService::new(None));
        let workflow = workflow(dir.path(), AcquisitionMode::Transcribe, service);

        let path = workflow.run("https://youtu.be/BdfsuRS8UfA").await.unwrap();
        assert_eq!(path, dir.path().join("BdfsuRS8UfA_subtitles.txt"));
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_existing_output_dir_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        let service = Arc::new(ReversingService::new(None));
        let workflow = workflow(dir.path(), AcquisitionMode::Subtitles, service);

        let url = "https://youtu.be/BdfsuRS8UfA";
        workflow.run(url).await.unwrap();
        workflow.run(url).await.unwrap();
    }

    #[tokio::test]
    async fn test_failed_chunk_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let service = Arc::new(ReversingService::new(Some(2)));
        let workflow = workflow(dir.path(), AcquisitionMode::Subtitles, service);

        let err = workflow
            .run("https://www.youtube.com/watch?v=BdfsuRS8UfA")
            .await
            .unwrap_err();

        assert!(matches!(err, BisubError::Translation(_)));
        assert!(err.to_string().contains("chunk 2/2"), "{}", err);
        assert!(!dir.path().join("BdfsuRS8UfA.cn.vtt").exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_new_requires_api_key() {
        let config = Config::default();
        assert!(matches!(Workflow::new(config).await, Err(BisubError::Config(_))));
    }
}
