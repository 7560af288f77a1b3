use std::fs;
use std::io::{self, Write};
use std::path::Path;

use greeter_core::crypto::container::sealed_len;
use greeter_core::crypto::greeting::capacity;
use greeter_core::document::ConfigurationDocument;
use greeter_core::text::from_base64;
use greeter_core::{ErrorKind, GreetingStore, Outcome, StorageTarget, StoragePaths};
use tempfile::tempdir;

fn store_in(dir: &Path) -> GreetingStore<Vec<u8>> {
    GreetingStore::with_output(StoragePaths::in_directory(dir), Vec::new())
}

fn output_lines(store: GreetingStore<Vec<u8>>) -> Vec<String> {
    let out = String::from_utf8(store.into_output()).expect("output is utf-8");
    out.lines().map(String::from).collect()
}

/// Output stream that rejects every write.
struct ClosedPipe;

impl Write for ClosedPipe {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_greet_ends_with_hello_world() {
    let dir = tempdir().unwrap();
    let mut store = store_in(dir.path());

    assert_eq!(store.greet(), Outcome::Completed);

    let lines = output_lines(store);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with("Hello World!"));
    assert!(lines[0].contains("[+]: "));
}

#[test]
fn test_custom_greeting_ends_with_message() {
    let dir = tempdir().unwrap();
    let mut store = store_in(dir.path());

    assert_eq!(store.print_greeting("custom text", false), Outcome::Completed);

    assert!(store.errors().is_empty());
    let lines = output_lines(store);
    assert!(lines[0].ends_with("[+]: custom text"));
}

#[test]
fn test_encrypted_greeting_prints_base64_ciphertext() {
    let dir = tempdir().unwrap();
    let mut store = store_in(dir.path());

    assert_eq!(
        store.print_greeting("Este es muy importante!", true),
        Outcome::Completed
    );

    let lines = output_lines(store);
    let (_, encoded) = lines[0].rsplit_once("[+]: ").expect("accent present");
    assert!(!encoded.contains("importante"));
    assert_eq!(from_base64(encoded).unwrap().len(), 128);
}

#[test]
fn test_oversized_encrypted_greeting_records_one_failure() {
    let dir = tempdir().unwrap();
    let mut store = store_in(dir.path());
    let message = "x".repeat(capacity(store.key_bits()) + 50);

    let outcome = store.print_greeting(&message, true);

    assert_eq!(outcome, Outcome::Failed(ErrorKind::EncryptionFailure));
    assert_eq!(store.errors().len(), 1);
    assert_eq!(store.errors().count(ErrorKind::EncryptionFailure), 1);
    assert_eq!(store.errors().entries()[0].operation, "print_greeting");

    let lines = output_lines(store);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with("[x]: Your message was unable to be encrypted."));
}

#[test]
fn test_key_generation_failure_records_unknown() {
    let dir = tempdir().unwrap();
    let mut store = store_in(dir.path()).with_key_bits(0);

    let outcome = store.print_greeting("", true);

    assert_eq!(outcome, Outcome::Failed(ErrorKind::Unknown));
    assert_eq!(store.errors().len(), 1);
    assert_eq!(store.errors().count(ErrorKind::Unknown), 1);
    assert_eq!(store.errors().entries()[0].operation, "print_greeting");

    let lines = output_lines(store);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with("[x]: There was an error printing your message."));
}

#[test]
fn test_output_failure_is_recorded() {
    let dir = tempdir().unwrap();
    let mut store = GreetingStore::with_output(StoragePaths::in_directory(dir.path()), ClosedPipe);

    let outcome = store.print_greeting("nobody hears this", false);

    assert_eq!(outcome, Outcome::Failed(ErrorKind::OutputFailure));
    assert_eq!(store.errors().len(), 1);
    assert!(store.errors().entries()[0].message.contains("pipe closed"));
}

#[test]
fn test_store_plain_file_overwrites() {
    let dir = tempdir().unwrap();
    let mut store = store_in(dir.path());
    let path = store.paths().plain().to_path_buf();

    assert_eq!(
        store.store_data("Test data to store...", StorageTarget::PlainFile),
        Outcome::Completed
    );
    let first = fs::read_to_string(&path).unwrap();
    assert!(first.contains("Test data to store..."));

    assert_eq!(
        store.store_data("replacement", StorageTarget::PlainFile),
        Outcome::Completed
    );
    let second = fs::read_to_string(&path).unwrap();
    assert!(second.contains("replacement"));
    assert!(!second.contains("Test data to store..."));
    assert_eq!(
        second,
        ConfigurationDocument::new("replacement").to_toml().unwrap()
    );

    assert!(store.errors().is_empty());
    let lines = output_lines(store);
    assert!(lines.iter().all(|l| l.ends_with("[+]: Stored data into a file!")));
}

#[test]
fn test_store_container_is_opaque() {
    let dir = tempdir().unwrap();
    let mut store = store_in(dir.path());
    let data = "Some more test data...";

    assert_eq!(
        store.store_data(data, StorageTarget::EncryptedContainer),
        Outcome::Completed
    );

    let raw = fs::read(store.paths().container()).unwrap();
    assert!(!raw.windows(data.len()).any(|w| w == data.as_bytes()));

    let plain_len = ConfigurationDocument::new(data).to_bytes().unwrap().len();
    assert_eq!(raw.len(), sealed_len(plain_len));
    assert_eq!(raw.len() % 16, 0);

    assert!(!store.paths().plain().exists());
    let lines = output_lines(store);
    assert!(lines[0].ends_with("[+]: Stored data into an encrypted container!"));
}

#[test]
fn test_store_container_is_deterministic() {
    let dir = tempdir().unwrap();
    let mut store = store_in(dir.path());

    store.store_data("same", StorageTarget::EncryptedContainer);
    let first = fs::read(store.paths().container()).unwrap();
    store.store_data("same", StorageTarget::EncryptedContainer);
    let second = fs::read(store.paths().container()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_store_database_only_warns() {
    let dir = tempdir().unwrap();
    let mut store = store_in(dir.path());

    for data in ["", "This is even more data to be stored...", "\u{1F600}"] {
        assert_eq!(
            store.store_data(data, StorageTarget::Database),
            Outcome::Unsupported
        );
    }

    assert!(store.errors().is_empty());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    let lines = output_lines(store);
    assert_eq!(lines.len(), 3);
    assert!(lines
        .iter()
        .all(|l| l.ends_with("[!]: No database could be found to store data!")));
}

#[test]
fn test_missing_directory_records_directory_not_found() {
    let dir = tempdir().unwrap();
    let mut store = store_in(&dir.path().join("does").join("not").join("exist"));

    let outcome = store.store_data("data", StorageTarget::PlainFile);
    assert_eq!(outcome, Outcome::Failed(ErrorKind::DirectoryNotFound));
    assert_eq!(store.errors().len(), 1);

    let outcome = store.store_data("data", StorageTarget::EncryptedContainer);
    assert_eq!(outcome, Outcome::Failed(ErrorKind::DirectoryNotFound));
    assert_eq!(store.errors().len(), 2);
    assert_eq!(store.errors().count(ErrorKind::DirectoryNotFound), 2);

    let lines = output_lines(store);
    assert!(lines[0].ends_with("[x]: The provided data could not be stored into a file."));
    assert!(lines[1].ends_with("[x]: The provided data could not be stored into a container."));
}

#[test]
fn test_managed_directory_is_created_on_first_write() {
    let dir = tempdir().unwrap();
    let data_dir = dir.path().join("share").join("greeter");
    let mut store = GreetingStore::with_output(
        StoragePaths::in_managed_directory(&data_dir),
        Vec::new(),
    );

    assert_eq!(store.store_data("data", StorageTarget::PlainFile), Outcome::Completed);
    assert_eq!(
        store.store_data("data", StorageTarget::EncryptedContainer),
        Outcome::Completed
    );

    assert!(store.errors().is_empty());
    assert!(data_dir.join("config.toml").is_file());
    assert!(data_dir.join("config.enc").is_file());
}

#[test]
fn test_independent_stores_share_a_directory() {
    let dir = tempdir().unwrap();

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let path = dir.path().to_path_buf();
            std::thread::spawn(move || {
                let mut store = store_in(&path);
                for _ in 0..25 {
                    store.store_data(&format!("writer {}", i), StorageTarget::PlainFile);
                    store.store_data(&format!("writer {}", i), StorageTarget::EncryptedContainer);
                }
                store.errors().len()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 0);
    }
    let mut names: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["config.enc", "config.toml"]);
}

#[cfg(unix)]
#[test]
fn test_file_as_directory_records_directory_not_found() {
    let dir = tempdir().unwrap();
    let not_a_dir = dir.path().join("plain-file");
    fs::write(&not_a_dir, "occupied").unwrap();
    let mut store = store_in(&not_a_dir);

    let outcome = store.store_data("data", StorageTarget::PlainFile);

    assert_eq!(outcome, Outcome::Failed(ErrorKind::DirectoryNotFound));
    assert_eq!(store.errors().len(), 1);
}

#[cfg(target_os = "linux")]
#[test]
fn test_overlong_directory_records_path_too_long() {
    let dir = tempdir().unwrap();
    let mut store = store_in(&dir.path().join("n".repeat(300)));

    let outcome = store.store_data("data", StorageTarget::EncryptedContainer);

    assert_eq!(outcome, Outcome::Failed(ErrorKind::PathTooLong));
    assert_eq!(store.errors().len(), 1);
}

#[cfg(unix)]
#[test]
fn test_read_only_directory_records_access_denied() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let locked = dir.path().join("locked");
    fs::create_dir(&locked).unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();

    // Permission bits do not bind root.
    let canary = locked.join(".writable");
    if fs::write(&canary, b"").is_ok() {
        let _ = fs::remove_file(&canary);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }
    let mut store = store_in(&locked);

    let outcome = store.store_data("data", StorageTarget::PlainFile);

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
    assert_eq!(outcome, Outcome::Failed(ErrorKind::AccessDenied));
    assert_eq!(store.errors().len(), 1);
}

#[test]
fn test_error_log_accumulates_across_operations() {
    let dir = tempdir().unwrap();
    let mut store = store_in(&dir.path().join("missing"));
    let oversized = "y".repeat(capacity(store.key_bits()) + 1);

    store.greet();
    store.store_data("a", StorageTarget::PlainFile);
    store.print_greeting(&oversized, true);
    store.store_data("b", StorageTarget::Database);
    store.store_data("c", StorageTarget::EncryptedContainer);

    let kinds: Vec<_> = store.errors().iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ErrorKind::DirectoryNotFound,
            ErrorKind::EncryptionFailure,
            ErrorKind::DirectoryNotFound,
        ]
    );
}
