use assert_fs::prelude::*;
use assert_fs::TempDir;

use pgrate::config::{Config, ConfigFile, DatabaseConfig};
use pgrate::psql::{psql_args, Direction, CONNECT_CHECK_QUERY};
use pgrate::Error;

fn config_for(scripts_dir: &TempDir) -> Config {
    Config {
        database: DatabaseConfig {
            host: "localhost".to_string(),
            port: 5432,
            name: "mydb".to_string(),
            user: "alice".to_string(),
            password: String::new(),
            search_path: "public".to_string(),
        },
        migration_scripts_dir: scripts_dir.path().display().to_string(),
    }
}

#[test]
fn up_arguments_carry_ordered_files_after_the_fixed_prefix() {
    let temp = TempDir::new().unwrap();
    temp.child("up/003-c.sql").write_str("select 3;").unwrap();
    temp.child("up/001-a.sql").write_str("select 1;").unwrap();
    temp.child("up/002-b.sql").write_str("select 2;").unwrap();

    let args = psql_args(Direction::Up, &config_for(&temp)).unwrap();

    let dir = format!("{}/up", temp.path().display());
    let expected: Vec<String> = vec![
        "-w".to_string(),
        "-d".to_string(),
        "postgresql://alice@localhost:5432/mydb?options=-csearch_path%3Dpublic".to_string(),
        "-c".to_string(),
        CONNECT_CHECK_QUERY.to_string(),
        "-f".to_string(),
        format!("{dir}/001-a.sql"),
        "-f".to_string(),
        format!("{dir}/002-b.sql"),
        "-f".to_string(),
        format!("{dir}/003-c.sql"),
    ];
    assert_eq!(args, expected);
}

#[test]
fn down_direction_reads_the_down_subdirectory() {
    let temp = TempDir::new().unwrap();
    temp.child("up/001-a.sql").write_str("select 1;").unwrap();
    temp.child("down/001-a.sql").write_str("drop table a;").unwrap();

    let args = psql_args(Direction::Down, &config_for(&temp)).unwrap();

    let last = args.last().unwrap();
    assert!(last.ends_with("/down/001-a.sql"), "got {last}");
}

#[test]
fn missing_direction_directory_fails() {
    let temp = TempDir::new().unwrap();
    temp.child("up/001-a.sql").write_str("select 1;").unwrap();

    let err = psql_args(Direction::Down, &config_for(&temp)).unwrap_err();
    assert!(matches!(err, Error::DirectoryRead { .. }), "got {err:?}");
}

#[test]
fn empty_direction_directory_fails() {
    let temp = TempDir::new().unwrap();
    temp.child("up").create_dir_all().unwrap();

    let err = psql_args(Direction::Up, &config_for(&temp)).unwrap_err();
    assert!(matches!(err, Error::EmptyDirectory(_)), "got {err:?}");
}

#[test]
fn loaded_profile_feeds_the_assembler() {
    let temp = TempDir::new().unwrap();
    temp.child("ddl/up/001-users.sql")
        .write_str("create table users (id serial primary key);")
        .unwrap();

    let profile = temp.child("test.json");
    profile
        .write_str(&format!(
            r#"{{
                "config": {{
                    "database": {{
                        "host": "localhost",
                        "port": 5432,
                        "name": "mydb",
                        "user": "alice",
                        "password": "",
                        "searchPath": "public"
                    }},
                    "migrationScriptsDir": "{}"
                }}
            }}"#,
            temp.path().join("ddl").display()
        ))
        .unwrap();

    let config_file = ConfigFile::load(profile.path()).unwrap();
    let args = psql_args(Direction::Up, &config_file.config).unwrap();

    assert_eq!(args[0], "-w");
    assert!(args.last().unwrap().ends_with("/up/001-users.sql"));
}
