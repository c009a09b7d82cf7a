//! Command implementations

use crate::args::{AnalyzeArgs, GenerateArgs};
use anyhow::Context;
use std::path::Path;
use testforge_core::{
    CodeAnalyzer, GenerateRequest, ServiceConfig, SourceLanguage, StorageBackend,
    TestFramework, TestPipeline, TestType,
};

/// Resolve the language from the flag or the file extension
fn resolve_language(file: &Path, flag: Option<&str>) -> anyhow::Result<SourceLanguage> {
    if let Some(language) = flag {
        return Ok(language.parse()?);
    }
    file.extension()
        .and_then(|ext| ext.to_str())
        .and_then(SourceLanguage::from_extension)
        .with_context(|| {
            format!(
                "Cannot infer language from {}; pass --language",
                file.display()
            )
        })
}

/// `testforge analyze`
pub async fn analyze(_config: Option<&Path>, args: AnalyzeArgs) -> anyhow::Result<()> {
    let source = tokio::fs::read_to_string(&args.file)
        .await
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let language = resolve_language(&args.file, args.language.as_deref())?;

    let analysis = CodeAnalyzer::new().analyze(&source, language)?;
    println!("{}", serde_json::to_string_pretty(&analysis)?);
    Ok(())
}

/// `testforge generate`
pub async fn generate(config: Option<&Path>, args: GenerateArgs) -> anyhow::Result<()> {
    let source = tokio::fs::read_to_string(&args.file)
        .await
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let language = resolve_language(&args.file, args.language.as_deref())?;

    let framework = match args.framework.as_deref() {
        Some(framework) => framework.parse()?,
        None => TestFramework::default_for(language),
    };
    let test_types = args
        .test_types
        .iter()
        .map(|name| name.parse())
        .collect::<Result<Vec<TestType>, _>>()?;

    let mut config = ServiceConfig::load(config)?;
    if let Some(output) = &args.output {
        // An explicit output directory always means local files
        config.storage = StorageBackend::Local;
        config.local_root = output.clone();
    }

    let pipeline = TestPipeline::from_config(&config)?;
    let outcome = pipeline
        .run(GenerateRequest {
            source_code: Some(source),
            gcs_path: None,
            language,
            test_types,
            framework,
        })
        .await?;

    tracing::info!(
        functions = outcome.functions_analyzed,
        tests = outcome.test_cases_generated,
        "generation complete"
    );

    if args.stdout {
        println!("{}", outcome.test_code);
    }
    println!(
        "Wrote {} test case(s) to {}",
        outcome.test_cases_generated, outcome.output_uri
    );
    Ok(())
}
