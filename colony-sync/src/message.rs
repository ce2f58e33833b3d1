//! Colony view message
//!
//! Framing: `colony_id: u32`, `is_new_subscription: u8`, then the
//! permissions view payload (see [`crate::view`]).

use bytes::Bytes;
use colony_core::models::PlayerId;
use colony_core::PermissionView;

use crate::codec::{DecodeError, EncodeError, ViewReader, ViewWriter, WireOrder};
use crate::view::encode_permissions_view;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColonyViewMessage {
    pub colony_id: u32,
    /// Whether the receiver should build a fresh view instead of updating one
    pub is_new_subscription: bool,
    pub payload: Bytes,
}

impl ColonyViewMessage {
    /// Build the message `viewer` receives for the colony `state`
    ///
    /// The viewer rank written into the payload is the viewer's rank in that
    /// colony, so non-members see themselves as `NEUTRAL`.
    pub fn for_viewer<V: PermissionView + ?Sized>(
        colony_id: u32,
        state: &V,
        viewer: &PlayerId,
        is_new_subscription: bool,
    ) -> Result<Self, EncodeError> {
        let mut writer = ViewWriter::new();
        encode_permissions_view(state, state.get_rank(viewer), &mut writer)?;
        Ok(Self {
            colony_id,
            is_new_subscription,
            payload: writer.freeze(),
        })
    }

    #[must_use]
    pub fn to_bytes(&self) -> Bytes {
        let mut writer = ViewWriter::new();
        writer.write_u32::<WireOrder>(self.colony_id);
        writer.write_bool(self.is_new_subscription);
        writer.write_bytes(&self.payload);
        writer.freeze()
    }

    pub fn from_bytes(bytes: Bytes) -> Result<Self, DecodeError> {
        let mut reader = ViewReader::new(bytes);
        let colony_id = reader.read_u32::<WireOrder>("colony id")?;
        let is_new_subscription = reader.read_bool("subscription flag")?;
        Ok(Self {
            colony_id,
            is_new_subscription,
            payload: reader.into_remaining(),
        })
    }

    /// Reader positioned at the start of the view payload
    #[must_use]
    pub fn payload_reader(&self) -> ViewReader {
        ViewReader::new(self.payload.clone())
    }
}
