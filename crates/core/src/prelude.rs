//! Marquee prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    device::{DeviceClass, MOBILE_BREAKPOINT_PX, Viewport},
    display::{
        Epoch,
        poster::{PosterCommand, PosterController, PosterState},
        rotation::{Cycle, RotationCommand, RotationController, RotationState},
        strip::AdStrip,
    },
    promotions::{
        PromotionId, PromotionRecord, Slot,
        eligibility::{first_eligible, is_eligible, next_window_change, select},
        wire::{Decoded, RecordError, WireError, decode},
    },
    timing::{Timings, TimingsError},
    view::{BannerView, Indicator, OutboundLink, Picture, PosterView, Render, StripView},
};
