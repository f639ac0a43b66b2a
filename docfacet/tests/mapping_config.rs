use std::io::Write;

use docfacet::{ConfigError, ConfigurationSource, MappingConfig, MappingReport, Model, ValueType, VectorDescriptor};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn catalog() -> anyhow::Result<Model> {
    let mut model = Model::new();
    let product = model.add_entity("Product")?;
    let id = model.add_field(product, "Id", ValueType::String)?;
    model.add_field(product, "Title", ValueType::String)?;
    model.add_field(product, "Embedding", ValueType::Array)?;
    model.set_primary_key(product, &[id])?;

    let variant = model.add_entity("Variant")?;
    let product_id = model.add_shadow_field(variant, "ProductId", ValueType::String)?;
    let ordinal = model.add_shadow_field(variant, "Id", ValueType::Int32)?;
    model.add_field(variant, "Sku", ValueType::String)?;
    model.set_ownership(variant, product, &[product_id], false)?;
    model.set_primary_key(variant, &[product_id, ordinal])?;
    Ok(model)
}

const CONFIG: &str = r#"
[entities.Product.fields.Title]
name = "title"
full_text = true
full_text_language = "en-US"

[entities.Product.fields.Embedding]
vector = { dimensions = 3, distance = "euclidean" }

[entities.Variant.fields.Sku]
name = ""
"#;

#[test]
fn applies_file_configuration() -> anyhow::Result<()> {
    init_logging();
    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(CONFIG.as_bytes())?;

    let mut model = catalog()?;
    let summary = MappingConfig::from_path(file.path())?.apply(&mut model)?;
    assert_eq!(summary.applied, 5);
    assert_eq!(summary.rejected, 0);

    let title = model.facets(model.lookup("Product", "Title")?);
    assert_eq!(title.external_name(), "title");
    assert_eq!(title.external_name_source(), Some(ConfigurationSource::Explicit));
    assert_eq!(title.full_text_search_enabled(), Some(true));
    assert_eq!(title.full_text_search_language(), Some("en-US"));

    let embedding = model.facets(model.lookup("Product", "Embedding")?);
    assert_eq!(embedding.vector().map(VectorDescriptor::dimensions), Some(3));

    assert_eq!(model.facets(model.lookup("Variant", "Sku")?).external_name(), "");
    Ok(())
}

#[test]
fn missing_file_is_reported() {
    let err = MappingConfig::from_path("/definitely/not/here.toml").expect_err("missing file");
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn zero_dimension_vector_fails_to_parse() {
    let err = MappingConfig::from_toml_str(
        r#"
        [entities.Product.fields.Embedding]
        vector = { dimensions = 0 }
        "#,
    )
    .expect_err("invalid vector");
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn unknown_entity_is_rejected() -> anyhow::Result<()> {
    let mut model = catalog()?;
    let config = MappingConfig::from_toml_str("[entities.Invoice.fields.Total]\nname = \"total\"\n")?;
    let err = config.apply(&mut model).expect_err("unknown entity");
    assert!(matches!(err, ConfigError::UnknownEntity { ref entity } if entity == "Invoice"));
    Ok(())
}

#[test]
fn report_reflects_resolved_names() -> anyhow::Result<()> {
    let mut model = catalog()?;
    MappingConfig::from_toml_str(CONFIG)?.apply(&mut model)?;

    let report = MappingReport::build(&model);
    let variant = report.entity("Variant").expect("variant report");
    assert_eq!(variant.owner.as_deref(), Some("Product"));
    assert!(!variant.document_root);
    assert!(variant.emitted_names().is_empty());

    let product = report.entity("Product").expect("product report");
    assert_eq!(product.emitted_names(), ["Id", "title", "Embedding"]);

    let json: serde_json::Value = serde_json::from_str(&report.to_json_pretty()?)?;
    let title = &json["entities"][0]["fields"][1];
    assert_eq!(title["external_name"], "title");
    assert_eq!(title["external_name_source"], "explicit");
    assert_eq!(title["full_text_search_language"], "en-US");
    assert!(json["entities"][0]["fields"][0].get("external_name_source").is_none());
    assert_eq!(json["entities"][1]["fields"][0]["omitted"], true);
    Ok(())
}
