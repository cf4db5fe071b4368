//! Tests for the command loop.

use super::*;
use crate::bot::mock::MockTransport;
use crate::bot::{AccessList, Command, CommandBatch, CommandContext, CommandTable};
use crate::device::mock::{ScriptedSource, online};
use crate::device::{AliasTable, DeviceScanner};
use crate::notify::{Registry, Subscription};
use crate::state::mock::MockStore;
use crate::time::InstantSleeper;

type TestLoop = CommandLoop<MockTransport, ScriptedSource, MockStore, InstantSleeper>;

fn command_loop(
    batches: Vec<CommandBatch>,
    access: AccessList,
    registry: &Registry,
) -> (TestLoop, Arc<MockTransport>) {
    let transport = Arc::new(MockTransport::new(batches));
    let scanner = Arc::new(DeviceScanner::new(
        ScriptedSource::new(vec![Some(online(&["a"]))]),
        AliasTable::new(),
    ));
    let dispatcher = CommandDispatcher::new(
        CommandTable::standard(),
        access,
        CommandContext {
            scanner,
            registry: registry.writer(),
            store: Arc::new(MockStore::new()),
        },
    );
    let command_loop =
        CommandLoop::new(Arc::clone(&transport), dispatcher).with_sleeper(InstantSleeper);
    (command_loop, transport)
}

mod step {
    use super::*;

    #[tokio::test]
    async fn first_fetch_has_no_offset() {
        let registry = Registry::new();
        let (mut commands, transport) = command_loop(vec![], AccessList::open(), &registry);

        commands.step().await;

        assert_eq!(transport.offsets(), [None]);
    }

    #[tokio::test]
    async fn replies_go_to_each_sender_in_order() {
        let registry = Registry::new();
        let batch = CommandBatch::new(
            vec![
                Command::new(10, 42, "alice", "d"),
                Command::new(11, 7, "bob", "nope"),
            ],
            Some(12),
        );
        let (mut commands, transport) = command_loop(vec![batch], AccessList::open(), &registry);

        let processed = commands.step().await;

        assert_eq!(processed, 2);
        assert_eq!(
            transport.sent(),
            [
                (42, "1. host-a\n".to_string()),
                (7, "Unknown command".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn offset_advances_past_last_command() {
        let registry = Registry::new();
        let batch = CommandBatch::new(vec![Command::new(10, 42, "alice", "h")], None);
        let (mut commands, transport) = command_loop(vec![batch], AccessList::open(), &registry);

        commands.step().await;
        commands.step().await;

        assert_eq!(commands.offset(), Some(11));
        assert_eq!(transport.offsets(), [None, Some(11)]);
    }

    #[tokio::test]
    async fn offset_advances_even_when_delivery_fails() {
        let registry = Registry::new();
        let batch = CommandBatch::new(vec![Command::new(10, 42, "alice", "h")], None);
        let (mut commands, transport) = command_loop(vec![batch], AccessList::open(), &registry);
        transport.fail_sends();

        commands.step().await;

        assert_eq!(commands.offset(), Some(11));
    }

    #[tokio::test]
    async fn skipped_updates_still_advance_offset() {
        let registry = Registry::new();
        let batch = CommandBatch::new(Vec::new(), Some(25));
        let (mut commands, _transport) = command_loop(vec![batch], AccessList::open(), &registry);

        commands.step().await;

        assert_eq!(commands.offset(), Some(25));
    }

    #[tokio::test]
    async fn failed_fetch_keeps_offset() {
        let registry = Registry::new();
        let batches = vec![
            CommandBatch::new(vec![Command::new(3, 42, "alice", "h")], None),
            CommandBatch::unavailable(),
        ];
        let (mut commands, _transport) = command_loop(batches, AccessList::open(), &registry);

        commands.step().await;
        let processed = commands.step().await;

        assert_eq!(processed, 0);
        assert_eq!(commands.offset(), Some(4));
    }

    #[tokio::test]
    async fn denied_sender_gets_exactly_access_denied() {
        let registry = Registry::new();
        let batch = CommandBatch::new(vec![Command::new(1, 7, "mallory", "register")], None);
        let (mut commands, transport) =
            command_loop(vec![batch], AccessList::new(["alice"]), &registry);

        commands.step().await;

        assert_eq!(transport.sent(), [(7, "Access denied".to_string())]);
        assert!(registry.reader().is_empty());
    }

    #[tokio::test]
    async fn register_command_subscribes_sender() {
        let registry = Registry::new();
        let batch = CommandBatch::new(vec![Command::new(1, 42, "alice", "Register")], None);
        let (mut commands, transport) = command_loop(vec![batch], AccessList::open(), &registry);

        commands.step().await;

        assert_eq!(
            transport.sent(),
            [(42, "notification registered".to_string())]
        );
        assert!(registry.reader().contains(&Subscription::device_changes(42)));
    }
}
