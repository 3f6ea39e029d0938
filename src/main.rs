use briefpress::{
    BriefingConfig, BriefingPipeline, FileFontProvider, NullPreviewResolver, PipelineError,
};
use std::env;
use std::fs;

/// A simple CLI to render a markdown briefing file into a PDF.
fn main() -> Result<(), PipelineError> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 5 || args.len() > 6 {
        eprintln!("Render a markdown-flavored briefing into a paginated PDF.");
        eprintln!();
        eprintln!(
            "Usage: {} <input.md> <output.pdf> <primary-font.ttf> <symbol-font.ttf> [config.json]",
            args[0]
        );
        eprintln!();
        eprintln!("The primary font must cover the briefing's body script;");
        eprintln!("the symbol font covers emoji and pictographs.");
        std::process::exit(1);
    }

    let input_path = &args[1];
    let output_path = &args[2];

    let config = match args.get(5) {
        Some(path) => {
            println!("Loading config from {}", path);
            BriefingConfig::from_json(&fs::read_to_string(path)?)?
        }
        None => BriefingConfig::default(),
    };

    println!("Loading briefing text from {}", input_path);
    let markdown = fs::read_to_string(input_path)?;

    let font_provider = FileFontProvider::new(&args[3], &args[4]);
    let pipeline = BriefingPipeline::new(config, &font_provider, Box::new(NullPreviewResolver))?;

    println!("Rendering PDF to {}...", output_path);
    let pdf = pipeline.render_pdf(&markdown)?;
    fs::write(output_path, &pdf)?;

    println!("Successfully generated {} ({} bytes)", output_path, pdf.len());
    Ok(())
}
