use prompt_vault::core::storage::AppCtx;
use prompt_vault::{ImportStrategy, SortOrder};
use std::fs;
use tempfile::tempdir;

#[test]
fn saved_vault_is_reloaded_with_config_applied() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("config.toml"),
        "data_file = \"store.json\"\nsort = \"title\"\nimport_strategy = \"replace\"\nduplicate_suffix = \" v2\"\n",
    )
    .unwrap();

    let mut ctx = AppCtx::open(dir.path().to_path_buf()).unwrap();
    assert_eq!(ctx.config.import_strategy, ImportStrategy::Replace);
    let id = ctx
        .vault
        .create_prompt("Outline", "bullet points", Some("Writing"), ["draft"])
        .unwrap();
    let copy = ctx.vault.duplicate_prompt(&id).unwrap();
    ctx.save().unwrap();
    assert!(dir.path().join("store.json").is_file());

    let reopened = AppCtx::open(dir.path().to_path_buf()).unwrap();
    assert_eq!(reopened.vault.criteria().sort, SortOrder::Title);
    assert_eq!(reopened.vault.store().len(), 2);
    assert_eq!(reopened.vault.get(&copy).unwrap().title, "Outline v2");
    assert!(reopened.vault.store().has_category("Writing"));
}

#[test]
fn bad_config_value_fails_to_open() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("config.toml"), "sort = \"sideways\"\n").unwrap();
    assert!(AppCtx::open(dir.path().to_path_buf()).is_err());
}

#[cfg(unix)]
#[test]
fn data_file_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let mut ctx = AppCtx::open(dir.path().join("home")).unwrap();
    ctx.vault.create_prompt("Secret", "", None, Vec::<String>::new()).unwrap();
    ctx.save().unwrap();
    let mode = fs::metadata(&ctx.data_path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}
