use docblocks::{build_document_with_options, DocError, DocumentModel, ParseOptions};
use std::env;
use std::fs;
use std::process;

fn main() {
    let _ = env_logger::try_init();

    let mut args: Vec<String> = env::args().skip(1).collect();

    let options = match take_options_arg(&mut args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("✗ {}", e);
            process::exit(2);
        }
    };

    if args.is_empty() {
        eprintln!("Usage: doc-inspect [--options <options.yaml>] <export.html>...");
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  doc-inspect export.html");
        eprintln!("  doc-inspect --options narrow.yaml *.html");
        process::exit(1);
    }

    let mut exit_code = 0;

    for file_path in &args {
        match inspect_file(file_path, &options) {
            Ok(model) => {
                println!("# {}", file_path);
                match serde_yaml::to_string(&model.blocks) {
                    Ok(yaml) => print!("{}", yaml),
                    Err(e) => eprintln!("  Could not serialize model: {}", e),
                }
                for warning in &model.warnings {
                    eprintln!("⚠ {}: {}", file_path, warning);
                }
                println!("✓ {}: {} blocks, {} anchors", file_path, model.len(), model.anchors.len());
            }
            Err(e) => {
                eprintln!("✗ {} could not be built:", file_path);
                print_error(&e);
                exit_code = 1;
            }
        }
    }

    process::exit(exit_code);
}

/// Pull `--options <path>` out of `args` and load it; defaults when absent.
fn take_options_arg(args: &mut Vec<String>) -> Result<ParseOptions, DocError> {
    let Some(pos) = args.iter().position(|a| a == "--options") else {
        return Ok(ParseOptions::default());
    };
    if pos + 1 >= args.len() {
        return Err(DocError::InvalidOptions("--options needs a file path".to_string()));
    }
    let path = args.remove(pos + 1);
    args.remove(pos);

    let yaml = fs::read_to_string(&path)
        .map_err(|e| DocError::InvalidOptions(format!("Failed to read {}: {}", path, e)))?;
    ParseOptions::from_yaml(&yaml)
}

fn inspect_file(path: &str, options: &ParseOptions) -> Result<DocumentModel, DocError> {
    let content = fs::read_to_string(path)
        .map_err(|e| DocError::Source(format!("Failed to read file: {}", e)))?;
    build_document_with_options(&content, options)
}

fn print_error(error: &DocError) {
    match error {
        DocError::MissingBody => {
            eprintln!("  Missing <body> section");
            eprintln!("    The export must contain a <body>...</body> region");
        }
        DocError::NoElements => {
            eprintln!("  Empty document:");
            eprintln!("    No headings, paragraphs, lists, images or dividers were found");
        }
        DocError::Source(msg) => {
            eprintln!("  Source error:");
            eprintln!("    {}", msg);
        }
        e => {
            eprintln!("  {}", e);
        }
    }
}
