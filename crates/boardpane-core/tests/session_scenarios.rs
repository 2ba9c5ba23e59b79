use std::sync::Arc;

use boardpane_core::{
    BoardFrame, FilteredListWindow, PersistableHandle, PersistableWindow, Printable, Rect,
    SavableWindow, Services, SessionFile, SessionSnapshot, SnapshotFormat, SubWindow,
};
use parking_lot::{Mutex, RwLock};

type NetList = Arc<RwLock<Vec<String>>>;

fn nets() -> NetList {
    Arc::new(RwLock::new(
        ["GND", "net1", "net10", "net11", "net2"]
            .iter()
            .map(|n| n.to_string())
            .collect(),
    ))
}

fn misc_window() -> Arc<Mutex<SavableWindow>> {
    Arc::new(Mutex::new(SavableWindow::new("display_misc", "Misc")))
}

fn net_window(source: NetList) -> Arc<Mutex<FilteredListWindow<NetList>>> {
    Arc::new(Mutex::new(FilteredListWindow::new("nets", "Nets", source)))
}

struct Component(&'static str);

impl Printable for Component {
    fn print_info(&self) -> String {
        format!("component {}", self.0)
    }
}

#[test]
fn test_two_windows_survive_a_session() {
    let source = nets();
    let w1 = misc_window();
    let w2 = net_window(source.clone());
    {
        let mut misc = w1.lock();
        misc.set_bounds(Rect::new(10, 10, 200, 100));
        misc.set_visible(true);
    }
    {
        let mut list = w2.lock();
        list.set_filter("net1");
        assert!(list.select(&[1]).is_empty());
    }

    let snapshot = SessionSnapshot::new(SnapshotFormat::Tagged);
    let mut stream = Vec::new();
    let windows: [PersistableHandle; 2] = [w1.clone(), w2.clone()];
    let saved = snapshot.write(&mut stream, &windows).unwrap();
    assert_eq!(saved.written, 2);

    let r1 = misc_window();
    let r2 = net_window(source);
    let restored: [PersistableHandle; 2] = [r1.clone(), r2.clone()];
    let report = snapshot.read(&mut stream.as_slice(), &restored).unwrap();
    assert!(report.is_complete());

    assert_eq!(r1.lock().bounds(), Rect::new(10, 10, 200, 100));
    assert!(r1.lock().is_visible());

    let list = r2.lock();
    assert_eq!(list.filter_text(), "net1");
    assert_eq!(list.selected_indices(), &[1]);
    assert_eq!(list.selected_entities(), vec![&"net10".to_string()]);
}

#[test]
fn test_frame_session_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board/windows.session");
    let services = Arc::new(Services::new());

    {
        let mut frame = BoardFrame::new(
            "Board",
            services.clone(),
            SessionFile::new(&path, SnapshotFormat::Tagged),
        );
        frame.main_window().lock().set_bounds(Rect::new(0, 0, 1024, 768));
        let list = frame.add_permanent(FilteredListWindow::new("nets", "Nets", nets()));
        {
            let mut list = list.lock();
            list.set_visible(true);
            list.set_filter("net");
            list.select(&[0, 3]);
        }
        let report = frame.save_session().unwrap();
        assert_eq!(report.written, 2);
    }

    // The board changed between sessions: one net is gone.
    let source = nets();
    source.write().retain(|name| name != "net2");

    let mut frame = BoardFrame::new(
        "Board",
        services,
        SessionFile::new(&path, SnapshotFormat::Tagged),
    );
    let list = frame.add_permanent(FilteredListWindow::new("nets", "Nets", source));
    let report = frame.load_session().unwrap();
    assert_eq!(report.restored, 2);

    assert_eq!(
        frame.main_window().lock().bounds(),
        Rect::new(0, 0, 1024, 768)
    );
    let list = list.lock();
    assert!(list.frame().is_visible());
    assert_eq!(list.entries().len(), 3);
    assert_eq!(list.selected_indices(), &[0]);
}

#[test]
fn test_iconify_is_idempotent_across_frame() {
    let dir = tempfile::tempdir().unwrap();
    let mut frame = BoardFrame::new(
        "Board",
        Arc::new(Services::new()),
        SessionFile::new(dir.path().join("windows.session"), SnapshotFormat::Tagged),
    );
    let shown = frame.add_permanent(SavableWindow::new("display_misc", "Misc"));
    shown.lock().set_visible(true);
    let hidden = frame.add_permanent(SavableWindow::new("color_manager", "Colors"));
    let info = frame.show_object_info("Parts", [Component("R1")].iter(), Rect::default());

    frame.iconify();
    frame.iconify();
    assert!(!shown.lock().is_visible());
    assert!(!info.lock().frame().is_visible());

    frame.deiconify();
    assert!(shown.lock().is_visible());
    assert!(!hidden.lock().is_visible());
    assert!(info.lock().frame().is_visible());

    frame.deiconify();
    assert!(shown.lock().is_visible());
}

#[test]
fn test_dispose_cascades_to_every_window() {
    let dir = tempfile::tempdir().unwrap();
    let mut frame = BoardFrame::new(
        "Board",
        Arc::new(Services::new()),
        SessionFile::new(dir.path().join("windows.session"), SnapshotFormat::Tagged),
    );
    let misc = frame.add_permanent(SavableWindow::new("display_misc", "Misc"));
    let parts = [Component("R1"), Component("C4")];
    let first = frame.show_object_info("R1", parts[..1].iter(), Rect::default());
    let second = frame.show_object_info("C4", parts[1..].iter(), Rect::default());

    // One info window closed by the user before the frame goes away.
    first.lock().dispose();
    assert_eq!(frame.transient().len(), 1);

    frame.dispose();
    assert!(frame.is_disposed());
    assert!(frame.transient().is_empty());
    assert!(frame.permanent_windows().is_empty());
    assert!(misc.lock().frame().is_disposed());
    assert!(second.lock().frame().is_disposed());
    assert_eq!(misc.lock().kind(), "display_misc");
}

#[test]
fn test_load_while_iconified_keeps_restored_visibility() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("windows.session");
    let services = Arc::new(Services::new());

    {
        let mut frame = BoardFrame::new(
            "Board",
            services.clone(),
            SessionFile::new(&path, SnapshotFormat::Tagged),
        );
        let misc = frame.add_permanent(SavableWindow::new("display_misc", "Misc"));
        misc.lock().set_visible(true);
        frame.save_session().unwrap();
    }

    let mut frame = BoardFrame::new(
        "Board",
        services,
        SessionFile::new(&path, SnapshotFormat::Tagged),
    );
    let misc = frame.add_permanent(SavableWindow::new("display_misc", "Misc"));
    frame.iconify();
    frame.load_session().unwrap();
    assert!(!misc.lock().is_visible());

    frame.deiconify();
    assert!(misc.lock().is_visible());
}
