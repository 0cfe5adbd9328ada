//! REST endpoints for the device proxy surface
//!
//! - `POST /govee/discover` - run discovery, return resolved device views
//! - `GET /govee/devices` - cached devices with refreshed state
//! - `POST /govee/devices/:deviceId/:action` - turn a device on or off

pub mod devices;
