#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::model::{
    parse_project, ConfigFormat, FieldDescriptor, FieldKind, FormatPredicate, Project, RuleSet,
    TypeDescriptor, TypedList,
};
use crate::ValidagenError;
use std::collections::BTreeMap;
use std::path::PathBuf;

fn person_project() -> Project {
    parse_project(
        r#"
Type = "struct"

[Validators.person]
Package = "person"
Name = "Person"

[Validators.person.Properties.Name]
Type = "string"
Required = true

[Validators.person.Properties.Age]
Type = "int"
Length = [0, 150]
"#,
        ConfigFormat::Toml,
    )
    .unwrap()
}

fn descriptor_with(fields: Vec<(&str, FieldDescriptor)>) -> TypeDescriptor {
    TypeDescriptor {
        package: "pkg".into(),
        properties: fields
            .into_iter()
            .map(|(k, f)| (k.to_string(), f))
            .collect::<BTreeMap<_, _>>(),
        ..Default::default()
    }
}

fn builtin() -> TemplateRenderer {
    TemplateRenderer::new(&TemplateSource::Builtin)
        .unwrap()
        .with_global(PROJECT_TYPE_GLOBAL, "struct")
}

// ---------------------------------------------------------------------------
// resolve
// ---------------------------------------------------------------------------

#[test]
fn test_name_falls_back_to_key() {
    let mut d = TypeDescriptor::default();
    resolve_defaults(&mut d, "person", None);
    assert_eq!(d.name.as_deref(), Some("person"));

    let mut d = TypeDescriptor {
        name: Some("Person".into()),
        ..Default::default()
    };
    resolve_defaults(&mut d, "person", None);
    assert_eq!(d.name.as_deref(), Some("Person"));
}

#[test]
fn test_method_name_fallback_chain() {
    let mut d = TypeDescriptor {
        method_name: Some("Own".into()),
        ..Default::default()
    };
    resolve_defaults(&mut d, "k", Some("Project"));
    assert_eq!(d.method_name.as_deref(), Some("Own"));

    let mut d = TypeDescriptor::default();
    resolve_defaults(&mut d, "k", Some("Project"));
    assert_eq!(d.method_name.as_deref(), Some("Project"));

    let mut d = TypeDescriptor::default();
    resolve_defaults(&mut d, "k", Some(""));
    assert_eq!(d.method_name.as_deref(), Some(DEFAULT_METHOD_NAME));

    let mut d = TypeDescriptor {
        method_name: Some(String::new()),
        ..Default::default()
    };
    resolve_defaults(&mut d, "k", None);
    assert_eq!(d.method_name.as_deref(), Some("Validate"));
}

#[test]
fn test_output_target_defaults() {
    let d = TypeDescriptor {
        package: "person".into(),
        ..Default::default()
    };
    let target = output_target(&d);
    assert_eq!(target.dir, PathBuf::from("person"));
    assert_eq!(target.file_name, "person_validator.go");
    assert_eq!(target.path, PathBuf::from("person/person_validator.go"));
    assert_eq!(target.mode, DEFAULT_FILE_MODE);
}

#[test]
fn test_output_target_explicit_values() {
    let d = TypeDescriptor {
        package: "person".into(),
        dir: Some("internal/model".into()),
        file_name: Some("checks.go".into()),
        file_mode: Some(0o600),
        ..Default::default()
    };
    let target = output_target(&d);
    assert_eq!(target.path, PathBuf::from("internal/model/checks.go"));
    assert_eq!(target.mode, 0o600);
}

#[test]
fn test_zero_file_mode_means_default() {
    let d = TypeDescriptor {
        package: "p".into(),
        file_mode: Some(0),
        ..Default::default()
    };
    assert_eq!(output_target(&d).mode, 0o644);
}

#[test]
fn test_missing_package_stays_relative() {
    let target = output_target(&TypeDescriptor::default());
    assert_eq!(target.path, PathBuf::from("_validator.go"));
}

#[test]
fn test_resolve_does_not_touch_explicit_values() {
    let mut d = TypeDescriptor {
        package: "p".into(),
        name: Some("N".into()),
        dir: Some("d".into()),
        file_name: Some("f.go".into()),
        file_mode: Some(0o640),
        method_name: Some("M".into()),
        ..Default::default()
    };
    let before = d.clone();
    let target = resolve_defaults(&mut d, "key", Some("Other"));

    assert_eq!(d, before);
    assert_eq!(target.path, PathBuf::from("d/f.go"));
    assert_eq!(target.mode, 0o640);
}

#[test]
fn test_resolve_fills_field_names() {
    let mut d = descriptor_with(vec![
        ("email", FieldDescriptor::new(FieldKind::String)),
        (
            "zip",
            FieldDescriptor {
                name: Some("ZipCode".into()),
                ..FieldDescriptor::new(FieldKind::String)
            },
        ),
    ]);
    resolve_defaults(&mut d, "k", None);
    assert_eq!(d.properties["email"].name.as_deref(), Some("email"));
    assert_eq!(d.properties["zip"].name.as_deref(), Some("ZipCode"));
}

// ---------------------------------------------------------------------------
// imports
// ---------------------------------------------------------------------------

#[test]
fn test_no_triggers_no_imports() {
    let mut project = person_project();
    let d = project.validators.get_mut("person").unwrap();
    assert!(infer_imports(d).is_empty());
    assert!(d.import.is_empty());
}

#[test]
fn test_match_adds_regexp() {
    let rules = RuleSet {
        r#match: "^[0-9]+$".into(),
        ..Default::default()
    };
    let mut d = descriptor_with(vec![(
        "zip",
        FieldDescriptor::new(FieldKind::String).with_rules(rules),
    )]);
    assert_eq!(infer_imports(&mut d), vec![REGEXP_IMPORT]);
    assert_eq!(d.import, vec![REGEXP_IMPORT]);
}

#[test]
fn test_format_predicate_adds_is_once() {
    let email = RuleSet::default().with_format(FormatPredicate::Email);
    let mut d = descriptor_with(vec![
        ("a", FieldDescriptor::new(FieldKind::String).with_rules(email.clone())),
        ("b", FieldDescriptor::new(FieldKind::String).with_rules(email)),
    ]);
    infer_imports(&mut d);
    infer_imports(&mut d);
    assert_eq!(d.import, vec![IS_IMPORT]);
}

#[test]
fn test_every_format_predicate_triggers_is_import() {
    for predicate in FormatPredicate::ALL {
        let d = descriptor_with(vec![(
            "x",
            FieldDescriptor::new(FieldKind::String)
                .with_rules(RuleSet::default().with_format(*predicate)),
        )]);
        assert!(SupportNeeds::of(&d).format, "{predicate} should need `is`");
    }
}

#[test]
fn test_both_imports_in_order_after_explicit_ones() {
    let rules = RuleSet {
        r#match: "x".into(),
        ..RuleSet::default().with_format(FormatPredicate::Uuid)
    };
    let mut d = descriptor_with(vec![(
        "id",
        FieldDescriptor::new(FieldKind::String).with_rules(rules),
    )]);
    d.import.push("time".into());
    infer_imports(&mut d);
    assert_eq!(d.import, vec!["time", REGEXP_IMPORT, IS_IMPORT]);
}

#[test]
fn test_nested_rules_are_not_scanned() {
    let nested = RuleSet {
        r#match: "x".into(),
        ..RuleSet::default().with_format(FormatPredicate::Email)
    };
    let rules = RuleSet {
        each: vec![nested.clone()],
        r#else: vec![nested],
        ..Default::default()
    };
    let mut d = descriptor_with(vec![(
        "tags",
        FieldDescriptor::new(FieldKind::Array).with_rules(rules),
    )]);
    assert!(infer_imports(&mut d).is_empty());
}

// ---------------------------------------------------------------------------
// render
// ---------------------------------------------------------------------------

#[test]
fn test_builtin_template_renders_person() {
    let mut project = person_project();
    let d = project.validators.get_mut("person").unwrap();
    resolve_defaults(d, "person", None);
    infer_imports(d);

    let out = builtin().render("person", d).unwrap();
    assert!(out.starts_with("// Code generated by validagen. DO NOT EDIT."));
    assert!(out.contains("package person"));
    assert!(out.contains("func (v Person) Validate() error {"));
    assert!(out.contains("validation.ValidateStruct(&v,"));
    assert!(out.contains("validation.Field(&v.Name, validation.Required),"));
    assert!(out.contains("validation.Field(&v.Age, validation.Length(0, 150)),"));
    assert!(!out.contains("\"regexp\""));
    assert!(!out.contains("ozzo-validation/v4/is\""));
    assert!(out.ends_with("}\n"));
}

#[test]
fn test_builtin_template_renders_rules() {
    let rules = RuleSet {
        r#in: TypedList {
            string: vec!["a".into(), "b\"c".into()],
            ..Default::default()
        },
        not_in: TypedList {
            int: vec![1, 2],
            ..Default::default()
        },
        r#match: r"^\d+$".into(),
        multiple_of: vec![TypedList {
            int: vec![5],
            ..Default::default()
        }],
        each: vec![RuleSet {
            rune_length: vec![1, 3],
            ..Default::default()
        }],
        ..RuleSet::default().with_format(FormatPredicate::Email)
    };
    let mut d = descriptor_with(vec![(
        "code",
        FieldDescriptor::new(FieldKind::String).with_rules(rules),
    )]);
    resolve_defaults(&mut d, "Code", None);
    infer_imports(&mut d);

    let out = builtin().render("Code", &d).unwrap();
    assert!(out.contains(r#"validation.In("a", "b\"c")"#), "{out}");
    assert!(out.contains("validation.NotIn(1, 2)"), "{out}");
    assert!(out.contains(r#"validation.Match(regexp.MustCompile("^\\d+$"))"#), "{out}");
    assert!(out.contains("validation.MultipleOf(5)"), "{out}");
    assert!(out.contains("is.Email"), "{out}");
    assert!(out.contains("validation.Each(validation.RuneLength(1, 3))"), "{out}");
    assert!(out.contains("\t\"regexp\""), "{out}");
    assert!(out.contains("\t\"github.com/go-ozzo/ozzo-validation/v4/is\""), "{out}");
}

#[test]
fn test_builtin_template_map_kind() {
    let mut project = person_project();
    let d = project.validators.get_mut("person").unwrap();
    resolve_defaults(d, "person", None);

    let renderer = TemplateRenderer::new(&TemplateSource::Builtin)
        .unwrap()
        .with_global(PROJECT_TYPE_GLOBAL, "map");
    let out = renderer.render("person", d).unwrap();
    assert!(out.contains("validation.Map("));
    assert!(out.contains(r#"validation.Key("Name", validation.Required),"#));
}

#[test]
fn test_render_is_deterministic() {
    let mut project = person_project();
    let d = project.validators.get_mut("person").unwrap();
    resolve_defaults(d, "person", None);
    infer_imports(d);

    let renderer = builtin();
    let first = renderer.render("person", d).unwrap();
    let second = renderer.render("person", d).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_custom_template_helpers() {
    let source = "{% for k, p in Properties|items %}{{ p.Name }}:\
{{ isValidNumericList(p.In) }},{{ isValidIntList(p.In) }},\
{{ isValidFloatList(p.In) }},{{ isValidStringList(p.In) }};{% endfor %}";
    let renderer = TemplateRenderer::from_source("helpers.tmpl", source.to_string()).unwrap();

    let list = |int: Vec<i64>, float: Vec<f64>, string: Vec<&str>| RuleSet {
        r#in: TypedList {
            int,
            float,
            string: string.into_iter().map(String::from).collect(),
        },
        ..Default::default()
    };
    let mut d = descriptor_with(vec![
        ("a", FieldDescriptor::new(FieldKind::Int).with_rules(list(vec![1], vec![], vec![]))),
        ("b", FieldDescriptor::new(FieldKind::Float).with_rules(list(vec![], vec![0.5], vec![]))),
        ("c", FieldDescriptor::new(FieldKind::String).with_rules(list(vec![], vec![], vec!["x"]))),
        ("d", FieldDescriptor::new(FieldKind::String)),
    ]);
    resolve_defaults(&mut d, "k", None);

    let out = renderer.render("k", &d).unwrap();
    assert_eq!(
        out,
        "a:True,True,False,False;b:True,False,True,False;c:False,False,False,True;d:False,False,False,False;"
    );
}

#[test]
fn test_custom_template_sees_resolved_descriptor() {
    let renderer = TemplateRenderer::from_source(
        "fields.tmpl",
        "{{ Name }}.{{ MethodName }} {{ FileName }} {{ FileMode }} {{ Import|join(',') }}".to_string(),
    )
    .unwrap();
    let mut d = descriptor_with(vec![(
        "x",
        FieldDescriptor::new(FieldKind::String)
            .with_rules(RuleSet::default().with_format(FormatPredicate::Ip)),
    )]);
    resolve_defaults(&mut d, "Thing", Some("Check"));
    infer_imports(&mut d);

    let out = renderer.render("Thing", &d).unwrap();
    assert_eq!(out, format!("Thing.Check pkg_validator.go 420 {IS_IMPORT}"));
}

#[test]
fn test_formats_global_lists_every_predicate() {
    let renderer =
        TemplateRenderer::from_source("formats.tmpl", "{{ Formats|join(',') }}".to_string())
            .unwrap();
    let out = renderer.render("k", &TypeDescriptor::default()).unwrap();
    let expected: Vec<_> = FormatPredicate::ALL.iter().map(|p| p.as_str()).collect();
    assert_eq!(out, expected.join(","));
}

#[test]
fn test_builtin_template_renders_every_format_predicate() {
    let mut rules = RuleSet::default();
    for predicate in FormatPredicate::ALL {
        rules.formats.insert(*predicate);
    }
    let mut d = descriptor_with(vec![(
        "x",
        FieldDescriptor::new(FieldKind::String).with_rules(rules),
    )]);
    resolve_defaults(&mut d, "All", None);

    let out = builtin().render("All", &d).unwrap();
    for predicate in FormatPredicate::ALL {
        assert!(out.contains(&format!(", is.{predicate}")), "missing is.{predicate}");
    }
}

#[test]
fn test_template_parse_error() {
    let err = TemplateRenderer::from_source("broken.tmpl", "{% for x in %}".to_string())
        .err()
        .unwrap();
    assert!(matches!(err, ValidagenError::Template { ref name, .. } if name == "broken.tmpl"));
}

#[test]
fn test_missing_template_file() {
    let err = TemplateRenderer::new(&TemplateSource::File("/nonexistent/t.tmpl".into()))
        .err()
        .unwrap();
    assert!(matches!(err, ValidagenError::Io { .. }));
}

#[test]
fn test_render_error_names_the_type() {
    let renderer =
        TemplateRenderer::from_source("bad.tmpl", "{{ nothing.here }}".to_string()).unwrap();
    let err = renderer
        .render("person", &TypeDescriptor::default())
        .unwrap_err();
    assert!(matches!(err, ValidagenError::Render { ref key, .. } if key == "person"));
}

#[test]
fn test_template_source_from_path() {
    assert_eq!(TemplateSource::from_path(None), TemplateSource::Builtin);
    assert_eq!(TemplateSource::from_path(Some("")), TemplateSource::Builtin);
    assert_eq!(
        TemplateSource::from_path(Some("t.tmpl")),
        TemplateSource::File(PathBuf::from("t.tmpl"))
    );
}

// ---------------------------------------------------------------------------
// driver
// ---------------------------------------------------------------------------

#[test]
fn test_generate_person_scenario() {
    let mut project = person_project();
    project.validators.get_mut("person").unwrap().name = None;
    let mut writer = DryRunWriter::default();

    let files = generate_validators(&mut project, &builtin(), &mut writer).unwrap();

    assert_eq!(files.len(), 1);
    assert_eq!(files, writer.files);
    let file = &files[0];
    assert_eq!(file.key, "person");
    assert_eq!(file.path, PathBuf::from("person/person_validator.go"));
    assert_eq!(file.mode, 0o644);

    let person = &project.validators["person"];
    assert_eq!(person.name.as_deref(), Some("person"));
    assert_eq!(person.method_name.as_deref(), Some("Validate"));
    assert!(person.import.is_empty());
}

#[test]
fn test_generate_email_scenario_adds_is_once() {
    let mut project = person_project();
    let person = project.validators.get_mut("person").unwrap();
    for field in person.properties.values_mut() {
        field.rules.formats.insert(FormatPredicate::Email);
    }
    let mut writer = DryRunWriter::default();

    let files = generate_validators(&mut project, &builtin(), &mut writer).unwrap();

    assert_eq!(project.validators["person"].import, vec![IS_IMPORT]);
    assert_eq!(files[0].contents.matches(IS_IMPORT).count(), 1);
}

#[test]
fn test_generate_processes_types_in_key_order() {
    let mut project = person_project();
    let person = project.validators["person"].clone();
    project.validators.insert(
        "address".into(),
        TypeDescriptor {
            package: "address".into(),
            name: None,
            ..person
        },
    );
    let mut writer = DryRunWriter::default();
    generate_validators(&mut project, &builtin(), &mut writer).unwrap();

    let keys: Vec<_> = writer.files.iter().map(|f| f.key.as_str()).collect();
    assert_eq!(keys, vec!["address", "person"]);
}

struct FailingRenderer;

impl Renderer for FailingRenderer {
    fn render(&self, key: &str, _descriptor: &TypeDescriptor) -> crate::Result<String> {
        if key == "b" {
            return Err(ValidagenError::Render {
                key: key.to_string(),
                source: minijinja::Error::new(minijinja::ErrorKind::InvalidOperation, "boom"),
            });
        }
        Ok(format!("// {key}\n"))
    }
}

#[test]
fn test_render_failure_aborts_remaining_types() {
    let mut project = person_project();
    let person = project.validators["person"].clone();
    project.validators.clear();
    for key in ["a", "b", "c"] {
        project.validators.insert(key.into(), person.clone());
    }
    let mut writer = DryRunWriter::default();

    let result = generate_validators(&mut project, &FailingRenderer, &mut writer);

    assert!(matches!(result, Err(ValidagenError::Render { ref key, .. }) if key == "b"));
    let written: Vec<_> = writer.files.iter().map(|f| f.key.as_str()).collect();
    assert_eq!(written, vec!["a"]);
}

#[test]
fn test_fs_writer_creates_dirs_and_sets_mode() {
    let dir = tempfile::tempdir().unwrap();
    let file = GeneratedFile {
        key: "person".into(),
        path: dir.path().join("nested/person/person_validator.go"),
        mode: 0o600,
        contents: "package person\n".into(),
    };

    FsWriter.write(&file).unwrap();
    assert_eq!(std::fs::read_to_string(&file.path).unwrap(), "package person\n");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(&file.path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    let rewritten = GeneratedFile {
        contents: "package other\n".into(),
        ..file
    };
    FsWriter.write(&rewritten).unwrap();
    assert_eq!(std::fs::read_to_string(&rewritten.path).unwrap(), "package other\n");
}

#[test]
fn test_generate_from_config_validation_failure_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("out");
    let config = dir.path().join("validators.toml");
    std::fs::write(
        &config,
        format!(
            r#"
Type = "struct"
[Validators.person]
Package = "person"
Dir = "{}"
[Validators.person.Properties.Age]
Type = "int"
Length = [5, 2]
"#,
            out_dir.display()
        ),
    )
    .unwrap();

    let err = generate_from_config(&config, &GenerateOptions::default()).unwrap_err();
    assert!(matches!(err, ValidagenError::Validation(_)));
    assert!(!out_dir.exists());
}

#[test]
fn test_generate_from_config_writes_files() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("person");
    let config = dir.path().join("validators.toml");
    std::fs::write(
        &config,
        format!(
            r#"
Type = "struct"
[Validators.person]
Package = "person"
Name = "Person"
Dir = "{}"
[Validators.person.Properties.Email]
Type = "string"
Email = true
"#,
            out_dir.display()
        ),
    )
    .unwrap();

    let dry = generate_from_config(
        &config,
        &GenerateOptions {
            template: None,
            dry_run: true,
        },
    )
    .unwrap();
    assert_eq!(dry.len(), 1);
    assert!(!out_dir.exists(), "dry run must not write");

    let files = generate_from_config(&config, &GenerateOptions::default()).unwrap();
    let written = std::fs::read_to_string(out_dir.join("person_validator.go")).unwrap();
    assert_eq!(written, files[0].contents);
    assert!(written.contains("validation.Field(&v.Email, is.Email),"));
}

#[test]
fn test_generate_from_config_template_override() {
    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("custom.tmpl");
    std::fs::write(&template, "custom {{ Name }} {{ ProjectType }}").unwrap();
    let config = dir.path().join("validators.toml");
    std::fs::write(
        &config,
        r#"
Type = "map"
Template = "/nonexistent/ignored.tmpl"
[Validators.person]
Package = "person"
[Validators.person.Properties.Name]
Type = "string"
"#,
    )
    .unwrap();

    let files = generate_from_config(
        &config,
        &GenerateOptions {
            template: Some(template.display().to_string()),
            dry_run: true,
        },
    )
    .unwrap();
    assert_eq!(files[0].contents, "custom person map");

    let err = generate_from_config(
        &config,
        &GenerateOptions {
            template: None,
            dry_run: true,
        },
    )
    .unwrap_err();
    assert!(matches!(err, ValidagenError::Io { .. }));
}

// ---------------------------------------------------------------------------
// scaffold
// ---------------------------------------------------------------------------

#[test]
fn test_starter_config_is_valid() {
    let text = render_starter_config("person", crate::model::ProjectKind::Struct, "validators.toml")
        .unwrap();
    let project = parse_project(&text, ConfigFormat::Toml).unwrap();
    let report = crate::validate::validate_project(&project);

    assert!(report.is_empty(), "{report}");
    assert_eq!(project.validators["person"].name(), Some("Person"));
    assert!(text.contains("validagen generate validators.toml"));
}

#[test]
fn test_starter_config_rejects_bad_package() {
    let err = render_starter_config("my-pkg", crate::model::ProjectKind::Map, "v.toml").unwrap_err();
    assert!(matches!(err, ValidagenError::Scaffold(_)));
}
