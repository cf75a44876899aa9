use central_terminal::fs::{path, FileType, VfsError};
use central_terminal::output::{MemorySink, OutputLine};
use central_terminal::{ShellConfig, Terminal, Vfs};

fn terminal() -> (Terminal, MemorySink) {
    let sink = MemorySink::new();
    let terminal = Terminal::new(ShellConfig::default(), Box::new(sink.clone()));
    (terminal, sink)
}

#[test]
fn parent_then_basename_is_identity_at_any_depth() {
    let mut vfs = Vfs::new();
    vfs.mkdir_recursive("/a/b/c/d/e").unwrap();
    for dir in ["/a", "/a/b", "/a/b/c", "/a/b/c/d", "/a/b/c/d/e"] {
        vfs.chdir(dir).unwrap();
        let cwd = vfs.cwd().to_string();
        let roundabout = format!("{}/../{}", cwd, path::basename(&cwd));
        assert_eq!(vfs.normalize(&roundabout), vfs.normalize(&cwd));
    }
}

#[test]
fn dotdot_at_root_stays_at_root() {
    let mut vfs = Vfs::new();
    vfs.chdir("/").unwrap();
    assert_eq!(vfs.normalize(".."), "/");
    assert_eq!(vfs.normalize("../../.."), "/");
}

#[test]
fn snapshot_reproduces_listings_and_contents() {
    let mut vfs = Vfs::new();
    vfs.mkdir_recursive("/srv/www").unwrap();
    vfs.write_file("/srv/www/index.html", "<h1>hi</h1>", FileType::Text, true).unwrap();
    vfs.chdir("/srv").unwrap();

    let restored = Vfs::from_json(&vfs.to_json().unwrap()).unwrap();
    assert_eq!(restored.cwd(), "/srv");
    for (p, node) in vfs.walk("/").unwrap() {
        if node.is_directory() {
            assert_eq!(restored.ls(&p).unwrap(), vfs.ls(&p).unwrap(), "listing of {}", p);
        } else {
            assert_eq!(restored.read_file(&p).unwrap(), vfs.read_file(&p).unwrap(), "content of {}", p);
        }
    }
}

#[test]
fn failed_creation_leaves_parent_unchanged() {
    let mut vfs = Vfs::new();
    let before = vfs.ls("/home/user").unwrap();

    assert!(matches!(vfs.mkdir("/home/user/README.txt"), Err(VfsError::AlreadyExists { .. })));
    assert!(matches!(vfs.mkdir("/home/user/missing/child"), Err(VfsError::NotFound { .. })));
    assert!(matches!(
        vfs.write_file("/home/user/README.txt/inner", "x", FileType::Text, true),
        Err(VfsError::NotADirectory { .. })
    ));
    assert!(matches!(
        vfs.write_file("/home/user", "x", FileType::Text, true),
        Err(VfsError::IsADirectory { .. })
    ));

    assert_eq!(vfs.ls("/home/user").unwrap(), before);
}

#[test]
fn directory_lifecycle() {
    let mut vfs = Vfs::new();
    vfs.mkdir("/x").unwrap();
    vfs.write_file("/x/f.txt", "hi", FileType::Text, true).unwrap();
    assert_eq!(vfs.ls("/x").unwrap(), vec!["f.txt"]);
    assert!(matches!(vfs.rmdir("/x"), Err(VfsError::NotEmpty { .. })));
    vfs.unlink("/x/f.txt").unwrap();
    vfs.rmdir("/x").unwrap();
    assert!(vfs.resolve("/x").is_none());
}

#[tokio::test]
async fn second_addon_start_is_rejected() {
    let (mut t, _sink) = terminal();
    t.session_mut().start_addon("editor", &["note.txt".to_string()]).unwrap();
    assert!(t.session_mut().start_addon("rps", &[]).is_err());
    assert_eq!(t.session().addons.active(), Some("editor"));
}

#[tokio::test]
async fn recall_matches_direct_run() {
    let (mut t, sink) = terminal();
    t.submit("echo a").await;
    t.submit("echo b").await;
    sink.take();

    t.submit("!1").await;
    let recalled = sink.take();
    t.submit("echo a").await;
    assert_eq!(recalled, sink.take());

    t.submit("!9").await;
    assert_eq!(sink.take(), vec![OutputLine::Error("!9: invalid history index".into())]);
    assert_eq!(t.session().history.entries(), &["echo a", "echo b", "!1", "echo a", "!9"]);
}

#[tokio::test]
async fn active_editor_swallows_commands() {
    let (mut t, sink) = terminal();
    t.submit("run editor note.txt").await;
    assert_eq!(t.session().addons.active(), Some("editor"));
    sink.take();

    t.submit("ls").await;
    assert_eq!(sink.take(), vec![OutputLine::Echo("editor> ls".into())]);

    t.submit("exit").await;
    assert_eq!(t.session().addons.active(), Some("editor"));

    t.submit(":p").await;
    assert_eq!(sink.texts(), vec!["   1  ls", "   2  exit"]);
}

#[tokio::test]
async fn script_session_end_to_end() {
    let (mut t, sink) = terminal();
    for line in ["mkdir /x", "cd /x", "touch f.txt", "ls", "cd ..", "rmdir /x"] {
        t.submit(line).await;
    }
    let texts = sink.texts();
    assert!(texts.contains(&"f.txt".to_string()));
    assert_eq!(texts.last().map(String::as_str), Some("rmdir: failed to remove '/x': Directory not empty"));
    assert_eq!(t.prompt(), "user@central-terminal:/$");
}
