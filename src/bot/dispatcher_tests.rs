//! Tests for command dispatch.

use super::*;
use crate::device::AliasTable;
use crate::device::mock::{ScriptedSource, online};
use crate::notify::Registry;
use crate::state::mock::MockStore;

struct Fixture {
    dispatcher: CommandDispatcher<ScriptedSource, MockStore>,
    scanner: Arc<DeviceScanner<ScriptedSource>>,
    registry: Registry,
    store: Arc<MockStore>,
}

fn fixture(polls: Vec<Option<(Vec<crate::device::RawDevice>, Vec<String>)>>, access: AccessList) -> Fixture {
    let scanner = Arc::new(DeviceScanner::new(
        ScriptedSource::new(polls),
        AliasTable::from_iter([("a".to_string(), "Ann".to_string())]),
    ));
    let registry = Registry::new();
    let store = Arc::new(MockStore::new());
    let dispatcher = CommandDispatcher::new(
        CommandTable::standard(),
        access,
        CommandContext {
            scanner: Arc::clone(&scanner),
            registry: registry.writer(),
            store: Arc::clone(&store),
        },
    );
    Fixture {
        dispatcher,
        scanner,
        registry,
        store,
    }
}

fn open() -> Fixture {
    fixture(Vec::new(), AccessList::open())
}

mod access {
    use super::*;

    #[test]
    fn dispatcher_exposes_configured_access_list() {
        let f = fixture(Vec::new(), AccessList::new(["alice"]));

        assert!(f.dispatcher.access().permits("alice"));
        assert!(!f.dispatcher.access().is_open());
    }

    #[tokio::test]
    async fn denied_sender_gets_only_access_denied() {
        let f = fixture(vec![Some(online(&["a"]))], AccessList::new(["alice"]));

        let reply = f.dispatcher.handle(&Command::new(1, 7, "mallory", "d")).await;

        assert_eq!(reply, "Access denied");
        assert_eq!(f.scanner.source().device_calls(), 0);
    }

    #[tokio::test]
    async fn denied_sender_cannot_subscribe() {
        let f = fixture(Vec::new(), AccessList::new(["alice"]));

        let reply = f.dispatcher.handle(&Command::new(1, 7, "mallory", "r")).await;

        assert_eq!(reply, "Access denied");
        assert!(f.registry.reader().is_empty());
        assert_eq!(f.store.writes(), 0);
    }

    #[tokio::test]
    async fn denial_precedes_unknown_command() {
        let f = fixture(Vec::new(), AccessList::new(["alice"]));

        let reply = f.dispatcher.handle(&Command::new(1, 7, "mallory", "xyzzy")).await;

        assert_eq!(reply, "Access denied");
    }

    #[tokio::test]
    async fn listed_sender_is_served() {
        let f = fixture(Vec::new(), AccessList::new(["alice"]));

        let reply = f.dispatcher.handle(&Command::new(1, 42, "alice", "h")).await;

        assert!(reply.starts_with("Help:\n"));
    }
}

mod routing {
    use super::*;

    #[tokio::test]
    async fn unknown_command() {
        let f = open();
        assert_eq!(
            f.dispatcher.handle(&Command::new(1, 42, "alice", "reboot")).await,
            "Unknown command"
        );
    }

    #[tokio::test]
    async fn device_list_aliases_route_to_listing() {
        let f = fixture(
            vec![
                Some(online(&["a", "b"])),
                Some(online(&["a", "b"])),
                Some(online(&["a", "b"])),
            ],
            AccessList::open(),
        );

        for text in ["d", "devices", "D"] {
            let reply = f.dispatcher.handle(&Command::new(1, 42, "alice", text)).await;
            assert_eq!(reply, "1. Ann\n2. host-b\n", "text={text}");
        }
    }

    #[tokio::test]
    async fn unavailable_router_is_reported() {
        let f = fixture(vec![None], AccessList::open());

        let reply = f.dispatcher.handle(&Command::new(1, 42, "alice", "devices")).await;

        assert_eq!(reply, "Device list is not available");
    }

    #[tokio::test]
    async fn no_connected_devices_is_reported() {
        let registered = vec![crate::device::mock::raw_device("a", "mac-a")];
        let f = fixture(
            vec![Some((registered, vec!["mac-unknown".to_string()]))],
            AccessList::open(),
        );

        let reply = f.dispatcher.handle(&Command::new(1, 42, "alice", "d")).await;

        assert_eq!(reply, "No devices online");
    }

    #[tokio::test]
    async fn help_lists_every_command() {
        let f = open();

        let reply = f.dispatcher.handle(&Command::new(1, 42, "alice", "help")).await;

        assert_eq!(reply, CommandTable::standard().help_text());
    }
}

mod subscriptions {
    use super::*;

    #[tokio::test]
    async fn register_persists_then_registers() {
        let f = open();

        let reply = f.dispatcher.handle(&Command::new(1, 42, "alice", "register")).await;

        assert_eq!(reply, "notification registered");
        assert!(f.registry.reader().contains(&Subscription::device_changes(42)));
        let stored = f.store.load("devices");
        assert_eq!(stored.command.as_deref(), Some("register"));
        assert_eq!(stored.subscribers, [Subscriber::new(42, "alice")]);
    }

    #[tokio::test]
    async fn register_twice_keeps_single_entry() {
        let f = open();

        f.dispatcher.handle(&Command::new(1, 42, "alice", "r")).await;
        f.dispatcher.handle(&Command::new(2, 42, "alice", "r")).await;

        assert_eq!(f.registry.reader().len(), 1);
        assert_eq!(f.store.load("devices").subscribers.len(), 1);
        assert_eq!(f.store.writes(), 1);
    }

    #[tokio::test]
    async fn unregister_removes_from_registry_and_store() {
        let f = open();
        f.dispatcher.handle(&Command::new(1, 42, "alice", "r")).await;

        let reply = f.dispatcher.handle(&Command::new(2, 42, "alice", "u")).await;

        assert_eq!(reply, "notification unregistered");
        assert!(f.registry.reader().is_empty());
        assert!(f.store.load("devices").is_empty());
    }

    #[tokio::test]
    async fn unregister_without_subscription_still_confirms() {
        let f = open();

        let reply = f.dispatcher.handle(&Command::new(1, 42, "alice", "unregister")).await;

        assert_eq!(reply, "notification unregistered");
        assert_eq!(f.store.writes(), 0);
    }

    #[tokio::test]
    async fn store_failure_leaves_registry_untouched() {
        let f = open();
        f.store.fail_writes();

        let reply = f.dispatcher.handle(&Command::new(1, 42, "alice", "r")).await;

        assert_eq!(reply, "Failed to save subscription state");
        assert!(f.registry.reader().is_empty());
    }

    #[tokio::test]
    async fn store_failure_on_unregister_keeps_subscription() {
        let f = open();
        f.dispatcher.handle(&Command::new(1, 42, "alice", "r")).await;
        f.store.fail_writes();

        let reply = f.dispatcher.handle(&Command::new(2, 42, "alice", "u")).await;

        assert_eq!(reply, "Failed to save subscription state");
        assert!(f.registry.reader().contains(&Subscription::device_changes(42)));
    }
}
