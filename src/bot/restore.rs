//! Startup replay of persisted subscriptions.

use super::AccessList;
use crate::notify::{HandlerId, RegistryWriter, Subscription};
use crate::state::SubscriptionStore;

/// Re-registers stored subscribers in the registry.
///
/// Every stored kind with a known handler is replayed. Subscribers that
/// no longer pass the access list and kinds without a handler are logged
/// and skipped. A subscriber stored without a name is only restored when
/// the access list is open. The store is not written.
///
/// Returns the number of subscriptions registered.
pub fn restore_subscriptions<St: SubscriptionStore>(
    store: &St,
    registry: &RegistryWriter,
    access: &AccessList,
) -> usize {
    let mut restored = 0;

    for kind in store.kinds() {
        let Some(handler) = HandlerId::from_kind(&kind) else {
            tracing::warn!(%kind, "Stored subscriptions for unknown kind, skipping");
            continue;
        };

        for subscriber in store.load(&kind).subscribers {
            if subscriber.name.is_empty() && !access.is_open() {
                tracing::warn!(
                    %kind,
                    chat_id = subscriber.id,
                    "Stored subscriber has no name to check against the access list, skipping"
                );
                continue;
            }
            if !access.permits(&subscriber.name) {
                tracing::warn!(
                    %kind,
                    user = %subscriber.name,
                    chat_id = subscriber.id,
                    "Stored subscriber no longer permitted, skipping"
                );
                continue;
            }

            let subscription = Subscription {
                handler,
                chat_id: subscriber.id,
            };
            if registry.register(subscription) {
                restored += 1;
            }
        }
    }

    tracing::info!(restored, "Subscriptions restored");
    restored
}
