//! Lifecycle hooks fired on client join/leave and channel create/close.

/// Callback receiving `(client id, channel id)`.
pub type ClientHook = Box<dyn Fn(&str, &str) + Send + Sync>;
/// Callback receiving the channel id.
pub type ChannelHook = Box<dyn Fn(&str) + Send + Sync>;

#[derive(Default)]
pub(crate) struct LifecycleHooks {
    pub client_join: Vec<ClientHook>,
    pub client_leave: Vec<ClientHook>,
    pub channel_create: Vec<ChannelHook>,
    pub channel_close: Vec<ChannelHook>,
}
