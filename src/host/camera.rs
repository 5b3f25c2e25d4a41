use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use tileworld::{Simulation, ViewTransform};

/// screen ↔ world mapping shared by input sampling and rendering
#[derive(Resource, Clone, Copy, Debug, Default, Deref)]
pub struct View(pub ViewTransform);

/// pixel snapping helper – keeps the camera on whole screen pixels so
/// sprites never land on half‑pixels and shimmer
#[inline]
fn snap(v: f32, zoom: f32) -> f32 {
    (v * zoom).round() / zoom
}

pub fn setup_camera(mut commands: Commands, view: Res<View>) {
    commands.spawn((
        Camera2d,
        OrthographicProjection {
            scale: 1.0 / view.zoom,
            ..OrthographicProjection::default_2d()
        },
    ));
}

/// horizontal follow; screen row 0 is always world row 0
///
/// NOTE: runs in **PostUpdate**, after the simulation stepped, so the view
/// written here is the one the next frame's pointer is mapped through.
pub fn camera_follow_system(
    mut cam_q: Query<&mut Transform, With<Camera>>,
    window_q:  Query<&Window, With<PrimaryWindow>>,
    sim:       Res<Simulation>,
    mut view:  ResMut<View>,
) {
    let Ok(mut cam_tf) = cam_q.get_single_mut() else { return };
    let Ok(window)     = window_q.get_single()  else { return };

    let zoom = view.zoom;
    let mut next = ViewTransform::centered_on(sim.player().center().x, window.width(), zoom);
    next.camera_x = snap(next.camera_x, zoom);
    view.0 = next;

    // bevy is y‑up, the world is y‑down
    let half_w = window.width() / zoom * 0.5;
    let half_h = window.height() / zoom * 0.5;
    cam_tf.translation.x = next.camera_x + half_w;
    cam_tf.translation.y = -half_h;
}
