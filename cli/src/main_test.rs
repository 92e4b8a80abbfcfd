use clap::CommandFactory;

use super::*;

// =============================================================
// Argument parsing
// =============================================================

#[test]
fn cli_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn export_defaults_to_stdin_and_card_file() {
    let cli = Cli::try_parse_from(["idcard", "export"]).unwrap();
    let Command::Export(args) = cli.command else { panic!("expected export") };
    assert_eq!(args.input, "-");
    assert_eq!(args.output, "id-card.svg");
}

#[test]
fn merge_collects_repeated_fields() {
    let cli = Cli::try_parse_from([
        "idcard", "merge", "design.json", "--field", "firstName=Ada", "--field", "title=CTO", "-o", "-",
    ])
    .unwrap();
    let Command::Merge(args) = cli.command else { panic!("expected merge") };
    assert_eq!(args.export.input, "design.json");
    assert_eq!(args.export.output, "-");
    assert_eq!(args.fields, vec!["firstName=Ada", "title=CTO"]);
}

#[test]
fn new_accepts_template() {
    let cli = Cli::try_parse_from(["idcard", "-v", "new", "--template", "vertical"]).unwrap();
    assert!(cli.verbose);
    let Command::New(args) = cli.command else { panic!("expected new") };
    assert_eq!(args.template, "vertical");
    assert_eq!(args.output, "-");
}

#[test]
fn templates_lists_every_preset() {
    let cli = Cli::try_parse_from(["idcard", "templates"]).unwrap();
    assert!(matches!(cli.command, Command::Templates));

    let listed: Vec<Template> = serde_json::from_str(&templates_json().unwrap()).unwrap();
    let ids: Vec<TemplateKind> = listed.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![TemplateKind::Modern, TemplateKind::Classic, TemplateKind::Vertical]);
    assert_eq!((listed[2].width, listed[2].height), (213.0, 338.0));
}

// =============================================================
// Fields
// =============================================================

#[test]
fn parse_fields_splits_on_first_equals() {
    let values = parse_fields(&["employeeId=A=1".to_owned(), " title =Lead".to_owned()]).unwrap();
    assert_eq!(values["employeeId"], "A=1");
    assert_eq!(values["title"], "Lead");
}

#[test]
fn parse_fields_rejects_missing_key() {
    assert!(matches!(parse_fields(&["noequals".to_owned()]), Err(CliError::InvalidField(_))));
    assert!(matches!(parse_fields(&["=value".to_owned()]), Err(CliError::InvalidField(_))));
}

// =============================================================
// File round trip
// =============================================================

#[test]
fn new_then_merge_then_export_to_file() {
    let dir = std::env::temp_dir().join(format!("idcard-cli-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let design = dir.join("design.json");
    let svg = dir.join("card.svg");
    let design_path = design.to_string_lossy().to_string();
    let svg_path = svg.to_string_lossy().to_string();

    run_new(&NewArgs { template: "classic".into(), output: design_path.clone() }).unwrap();
    let mut doc = CardDoc::from_json(&fs::read_to_string(&design).unwrap()).unwrap();
    doc.texts[0].content = "{{fullName}}".into();
    fs::write(&design, doc.to_json().unwrap()).unwrap();

    let values = parse_fields(&["fullName=Grace Hopper".to_owned()]).unwrap();
    run_export(&ExportArgs { input: design_path, output: svg_path }, &values).unwrap();

    let out = fs::read_to_string(&svg).unwrap();
    assert!(out.contains("Grace Hopper"));
    assert!(out.contains("EMPLOYEE ID"));
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn missing_input_is_io_error() {
    let args = ExportArgs { input: "/nonexistent/design.json".into(), output: "-".into() };
    assert!(matches!(run_export(&args, &HashMap::new()), Err(CliError::Io { .. })));
}
