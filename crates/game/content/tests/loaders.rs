use std::fs;

use hunt_content::{ConfigLoader, ContentFactory, MonsterLoader, WeaponLoader, builtin};
use hunt_core::{BreakDamageType, PartId};

#[test]
fn builtin_catalogs_parse() {
    let monsters = MonsterLoader::parse(builtin::MONSTERS).unwrap();
    let weapons = WeaponLoader::parse(builtin::WEAPONS).unwrap();
    let rules = ConfigLoader::parse(builtin::RULES).unwrap();

    assert!(monsters.find("rathalos").is_some());
    assert_eq!(weapons.find("Flame Blade").unwrap().element_type, "Fire");
    assert_eq!(rules, hunt_core::RulesConfig::default());
}

#[test]
fn monster_parts_derive_limits_from_max_health() {
    let catalog = MonsterLoader::parse(builtin::MONSTERS).unwrap();
    let rathalos = catalog.find("rathalos").unwrap().build();

    let head = rathalos.part(&PartId::new("Part0")).unwrap();
    assert_eq!(head.name, "Head");
    assert_eq!(head.stagger_limit, 72);
    assert_eq!(head.break_limit, 96);
    assert_eq!(
        head.break_damage_type,
        BreakDamageType::Only("Blunt".to_owned())
    );

    // omitted fields fall back to the stock body part
    let wings = rathalos.part(&PartId::new("Part1")).unwrap();
    assert_eq!(wings.resistances.get("Sonic"), Some(5.0));
    assert_eq!(wings.break_damage_type, BreakDamageType::Any);

    let poison = rathalos.status("poison").unwrap();
    assert_eq!(poison.current_limit, 50);
}

#[test]
fn monster_without_parts_gets_a_body() {
    let catalog = MonsterLoader::parse(builtin::MONSTERS).unwrap();
    let jagras = catalog.find("great-jagras").unwrap().build();

    assert_eq!(jagras.parts.len(), 1);
    assert_eq!(jagras.part(&PartId::new("Part0")).unwrap().name, "Body");
}

#[test]
fn load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("monsters.ron");
    fs::write(
        &path,
        r#"(monsters: [(id: "kulu", name: "Kulu-Ya-Ku", max_health: 300, max_stamina: 10)])"#,
    )
    .unwrap();

    let monsters = MonsterLoader::load(&path).unwrap();

    assert_eq!(monsters.len(), 1);
    assert_eq!(monsters[0].health.maximum, 300);
}

#[test]
fn partial_rules_file_keeps_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rules.toml");
    fs::write(&path, "stamina_decay_interval = 5\nskip_defeated = true\n").unwrap();

    let config = ConfigLoader::load(&path).unwrap();

    assert_eq!(config.stamina_decay_interval, 5);
    assert!(config.skip_defeated);
    assert_eq!(config.exhausted_stamina_recovery, 5);
}

#[test]
fn broken_files_report_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.ron");

    let err = MonsterLoader::load(&missing).unwrap_err();
    assert!(err.to_string().contains("nope.ron"));

    let bad = dir.path().join("bad.toml");
    fs::write(&bad, "stamina_decay_interval = \"ten\"").unwrap();
    assert!(ConfigLoader::load(&bad).is_err());
}

#[test]
fn factory_falls_back_to_builtin_data() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("rules.toml"), "status_limit_step = 40").unwrap();

    let factory = ContentFactory::new(dir.path());

    assert_eq!(factory.load_config().unwrap().status_limit_step, 40);
    assert!(factory.load_monsters().unwrap().find("rathalos").is_some());
    assert_eq!(ContentFactory::builtin().load_weapons().unwrap().weapons.len(), 3);
}
