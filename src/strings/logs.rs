pub fn config_loaded(user: &str) -> String {
    format!("Loaded configuration for user: {user}")
}

pub const LOGIN_SUCCESS: &str = "Logged in successfully!";

pub fn setting_display_name(name: &str) -> String {
    format!("Setting display name to: {name}")
}

pub fn set_display_name_fail(err: &str) -> String {
    format!("Failed to set display name: {err}")
}

pub const SYNC_LOOP_START: &str = "Starting sync loop...";

pub fn invite_received(room_id: &str) -> String {
    format!("💌 Received invite for room {room_id:?}")
}

pub fn join_invite_fail(err: &str) -> String {
    format!("Failed to join room after invite: {err}")
}

pub fn presence_fail(err: &str) -> String {
    format!("Failed to update presence: {err}")
}

pub fn route_fail(room_id: &str, err: &anyhow::Error) -> String {
    format!("Failed to route message in {room_id}: {err:#}")
}
