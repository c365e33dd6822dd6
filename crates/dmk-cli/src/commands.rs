use std::fs;
use std::path::Path;

use dmk_core::{ModKitError, ModState};
use dmk_parser::{parse_mod_document, validate_document};
use dmk_transform::{
    environment_template, scenario_strings, scenario_template, state_from_document,
    strings_template,
};
use serde::Serialize;
use walkdir::WalkDir;

use crate::{
    load_state, map_cli_output_write, map_cli_report, map_cli_scan_walk, map_cli_source_read,
    save_state, ImportArgs, RenderArgs, ScanArgs, StateFileV1, ValidateArgs, MOD_STATE_SCHEMA,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FileVerdict {
    file: String,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    document: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<VerdictError>,
}

#[derive(Debug, Serialize)]
struct VerdictError {
    code: String,
    message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ScanReport {
    dir: String,
    scanned: usize,
    valid: usize,
    invalid: usize,
    files: Vec<FileVerdict>,
}

/// Validity gate first, forward transform second: a document that fails
/// the gate is never partially imported.
pub(crate) fn run_import(args: ImportArgs) -> Result<i32, ModKitError> {
    let source = fs::read_to_string(&args.file).map_err(map_cli_source_read)?;
    let document = parse_mod_document(&source)?;
    let state = state_from_document(&document);

    save_state(
        Path::new(&args.state_out),
        &StateFileV1 {
            schema_version: MOD_STATE_SCHEMA.to_string(),
            state,
        },
    )?;

    println!(
        "{}",
        serde_json::json!({
            "imported": {
                "file": args.file,
                "document": document.kind.root_tag(),
                "stateOut": args.state_out,
            }
        })
    );
    Ok(0)
}

pub(crate) fn run_render(args: RenderArgs) -> Result<i32, ModKitError> {
    let stored = load_state(Path::new(&args.state_in))?;
    let (xml, strings) = match &stored.state {
        ModState::Environment(environment) => {
            (environment_template(environment, true), String::new())
        }
        ModState::Scenario(scenario) => (
            scenario_template(scenario, true),
            strings_template(&scenario_strings(scenario)),
        ),
    };

    write_output(Path::new(&args.out), &xml)?;

    let mut strings_out = None;
    if let Some(path) = &args.strings_out {
        if !strings.is_empty() {
            write_output(Path::new(path), &strings)?;
            strings_out = Some(path.clone());
        }
    }

    println!(
        "{}",
        serde_json::json!({
            "rendered": { "out": args.out, "stringsOut": strings_out }
        })
    );
    Ok(0)
}

pub(crate) fn run_validate(args: ValidateArgs) -> Result<i32, ModKitError> {
    let source = fs::read_to_string(&args.file).map_err(map_cli_source_read)?;
    let verdict = file_verdict(&args.file, &source);
    let exit_code = if verdict.valid { 0 } else { 1 };
    println!("{}", serde_json::to_string(&verdict).map_err(map_cli_report)?);
    Ok(exit_code)
}

pub(crate) fn run_scan(args: ScanArgs) -> Result<i32, ModKitError> {
    let report = scan_report(&args.dir)?;
    println!("{}", serde_json::to_string(&report).map_err(map_cli_report)?);
    Ok(if report.invalid == 0 { 0 } else { 1 })
}

/// One verdict per `.xml` file under `dir`. A file that cannot be read
/// counts as invalid and the scan moves on; only a broken directory walk
/// aborts the whole report.
fn scan_report(dir: &str) -> Result<ScanReport, ModKitError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(false) {
        let entry = entry.map_err(map_cli_scan_walk)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|extension| extension.to_str()) != Some("xml") {
            continue;
        }
        let file = path.display().to_string();
        match fs::read_to_string(path) {
            Ok(source) => files.push(file_verdict(&file, &source)),
            Err(error) => files.push(error_verdict(file, map_cli_source_read(error))),
        }
    }

    let valid = files.iter().filter(|verdict| verdict.valid).count();
    Ok(ScanReport {
        dir: dir.to_string(),
        scanned: files.len(),
        valid,
        invalid: files.len() - valid,
        files,
    })
}

fn file_verdict(file: &str, source: &str) -> FileVerdict {
    match validate_document(source) {
        Ok(kind) => FileVerdict {
            file: file.to_string(),
            valid: true,
            document: Some(kind.root_tag()),
            error: None,
        },
        Err(error) => error_verdict(file.to_string(), error),
    }
}

fn error_verdict(file: String, error: ModKitError) -> FileVerdict {
    FileVerdict {
        file,
        valid: false,
        document: None,
        error: Some(VerdictError {
            code: error.code,
            message: error.message,
        }),
    }
}

fn write_output(path: &Path, content: &str) -> Result<(), ModKitError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(map_cli_output_write)?;

    let payload = if content.is_empty() {
        String::new()
    } else {
        format!("{}\n", content)
    };
    fs::write(path, payload).map_err(map_cli_output_write)
}

#[cfg(test)]
mod command_tests {
    use super::*;

    #[test]
    fn file_verdict_reports_document_kind_for_valid_source() {
        let verdict = file_verdict("env.xml", "<environment/>");
        assert!(verdict.valid);
        assert_eq!(verdict.document, Some("environment"));
        assert!(verdict.error.is_none());
    }

    #[test]
    fn file_verdict_carries_error_for_invalid_source() {
        let verdict = file_verdict("mod.xml", "<mod/>");
        assert!(!verdict.valid);
        assert!(verdict.document.is_none());
        assert_eq!(
            verdict.error.as_ref().map(|error| error.code.as_str()),
            Some("XML_ROOT_INVALID")
        );
    }

    #[test]
    fn import_then_render_round_trips_a_scenario_file() {
        let dir = std::env::temp_dir().join("dmk-cli-commands-test");
        std::fs::create_dir_all(&dir).expect("temp dir");

        let source_path = dir.join("scenario.xml");
        let source = concat!(
            "<scenario id=\"first_settlers\">\n",
            "  <size value=\"3\"/>\n",
            "  <disasters>\n",
            "    <disaster disaster_type=\"Storm\" period=\"1.5y\" variance=\"0.3y\"/>\n",
            "  </disasters>\n",
            "</scenario>\n",
        );
        std::fs::write(&source_path, source).expect("write source");

        let state_path = dir.join("state.json");
        let code = run_import(ImportArgs {
            file: source_path.display().to_string(),
            state_out: state_path.display().to_string(),
        })
        .expect("import should succeed");
        assert_eq!(code, 0);

        let out_path = dir.join("out.xml");
        let code = run_render(RenderArgs {
            state_in: state_path.display().to_string(),
            out: out_path.display().to_string(),
            strings_out: None,
        })
        .expect("render should succeed");
        assert_eq!(code, 0);

        let rendered = std::fs::read_to_string(&out_path).expect("rendered output");
        assert_eq!(rendered, source);

        std::fs::remove_dir_all(&dir).expect("cleanup");
    }

    #[test]
    fn scan_records_unreadable_files_instead_of_aborting() {
        let dir = std::env::temp_dir().join("dmk-cli-scan-test");
        std::fs::create_dir_all(&dir).expect("temp dir");

        std::fs::write(dir.join("env.xml"), "<environment/>\n").expect("write valid file");
        // Invalid UTF-8, so read_to_string fails for this entry.
        std::fs::write(dir.join("broken.xml"), [0xff, 0xfe]).expect("write unreadable file");

        let report = scan_report(&dir.display().to_string()).expect("scan should finish");
        assert_eq!(report.scanned, 2);
        assert_eq!(report.valid, 1);
        assert_eq!(report.invalid, 1);

        let failed = report
            .files
            .iter()
            .find(|verdict| !verdict.valid)
            .expect("one failed verdict");
        assert_eq!(
            failed.error.as_ref().map(|error| error.code.as_str()),
            Some("CLI_SOURCE_READ")
        );

        std::fs::remove_dir_all(&dir).expect("cleanup");
    }

    #[test]
    fn render_writes_strings_file_only_when_goals_carry_descriptions() {
        let dir = std::env::temp_dir().join("dmk-cli-strings-test");
        std::fs::create_dir_all(&dir).expect("temp dir");

        let source_path = dir.join("scenario.xml");
        std::fs::write(
            &source_path,
            concat!(
                "<scenario id=\"first_settlers\">\n",
                "  <goals>\n",
                "    <goal id=\"hunt_mammoth\" description=\"Hunt a mammoth\"/>\n",
                "  </goals>\n",
                "</scenario>\n",
            ),
        )
        .expect("write source");

        let state_path = dir.join("state.json");
        run_import(ImportArgs {
            file: source_path.display().to_string(),
            state_out: state_path.display().to_string(),
        })
        .expect("import should succeed");

        let out_path = dir.join("out.xml");
        let strings_path = dir.join("strings.xml");
        run_render(RenderArgs {
            state_in: state_path.display().to_string(),
            out: out_path.display().to_string(),
            strings_out: Some(strings_path.display().to_string()),
        })
        .expect("render should succeed");

        let strings = std::fs::read_to_string(&strings_path).expect("strings output");
        assert!(strings.contains("<string name=\"hunt_mammoth\">Hunt a mammoth</string>"));

        std::fs::remove_dir_all(&dir).expect("cleanup");
    }
}
