mod core;
mod helpers;
mod pot;
mod ui;

use crate::core::camera::CameraPlugin;
use crate::pot::PotPlugin;
use crate::ui::UIPlugin;
use bevy::app::App;
#[cfg(debug_assertions)]
use bevy::diagnostic::LogDiagnosticsPlugin;
use bevy::prelude::*;

pub struct BoilingPotPlugin;

impl Plugin for BoilingPotPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((CameraPlugin, PotPlugin, UIPlugin));

        #[cfg(debug_assertions)]
        {
            app.add_plugins(LogDiagnosticsPlugin::default());
        }
    }
}
