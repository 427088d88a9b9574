//! Per-room idle watchers.

use std::sync::Arc;

use pokerforge_protocol::RoomCode;
use tokio::task::JoinHandle;

use crate::RoomStore;

/// Spawns the background task that sweeps `code` on the store's sweep
/// cadence and exits once the room is gone.
///
/// Must be called from inside a tokio runtime. The handle resolves to the
/// number of passes run; dropping it detaches the task.
pub fn spawn_idle_watcher(store: Arc<RoomStore>, code: RoomCode) -> JoinHandle<u64> {
    let config = store.config().sweep.clone();
    let label = format!("room {code}");
    pokerforge_sweep::spawn_watcher(label, config, move || store.check_room_activity(&code))
}
