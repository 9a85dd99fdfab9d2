//! Carnival set pieces and actors as baked meshes.
//!
//! The static set (ground, booth, tank, rail) is assembled once in world
//! space and uploaded as a single buffer. The actors (duck, bare target)
//! are built in local space and placed each frame with a model matrix.

use glam::{Mat4, Quat, Vec3};

use crate::mesh::{cone, cuboid, disk, grid_plane, sphere, MeshBuffer};
use crate::params::SceneLayout;

const GROUND_COLOR: [f32; 3] = [0.12, 0.45, 0.2];
const BOOTH_COLOR: [f32; 3] = [0.62, 0.62, 0.66];
const BEAM_COLOR: [f32; 3] = [0.4, 0.4, 0.45];
const TRIM_COLOR: [f32; 3] = [0.7, 0.25, 0.25];
const WATER_BODY_COLOR: [f32; 3] = [0.16, 0.38, 0.7];
const RAIL_COLOR: [f32; 3] = [0.35, 0.35, 0.38];

const DUCK_BODY_COLOR: [f32; 3] = [0.95, 0.78, 0.18];
const DUCK_WING_COLOR: [f32; 3] = [0.85, 0.7, 0.2];
const DUCK_BEAK_COLOR: [f32; 3] = [0.95, 0.5, 0.05];
const DUCK_EYE_COLOR: [f32; 3] = [0.1, 0.1, 0.1];
const TARGET_WHITE: [f32; 3] = [0.9, 0.9, 0.9];
const TARGET_RED: [f32; 3] = [0.9, 0.1, 0.1];

fn place(mesh: MeshBuffer, translation: Vec3) -> MeshBuffer {
    mesh.transformed(Mat4::from_translation(translation))
}

/// Grass apron around the booth.
pub fn ground(layout: &SceneLayout) -> MeshBuffer {
    place(
        grid_plane(layout.ground_size_m, layout.ground_grid, GROUND_COLOR),
        Vec3::new(0.0, -0.02, 0.0),
    )
}

/// Booth shell: platform, ceiling, walls, opening beams and counter trim.
pub fn booth(layout: &SceneLayout) -> MeshBuffer {
    let w = layout.booth_width_m;
    let d = layout.booth_depth_m;
    let h = layout.booth_height_m;

    let mut mesh = MeshBuffer::new();

    // floor platform and ceiling slab
    mesh.merge(place(
        cuboid(Vec3::new(w, 1.2, d), BOOTH_COLOR),
        Vec3::new(0.0, 0.6, 0.0),
    ));
    mesh.merge(place(
        cuboid(Vec3::new(w, 1.2, d), BOOTH_COLOR),
        Vec3::new(0.0, h - 0.6, 0.0),
    ));

    // side walls
    for side in [-1.0_f32, 1.0] {
        mesh.merge(place(
            cuboid(Vec3::new(0.8, h - 1.2, d), BOOTH_COLOR),
            Vec3::new(side * (w * 0.5 - 0.4), h * 0.5, 0.0),
        ));
    }

    // back wall
    mesh.merge(place(
        cuboid(Vec3::new(w - 0.8, h - 1.2, 0.8), BOOTH_COLOR),
        Vec3::new(0.0, h * 0.5, -d * 0.5 + 0.4),
    ));

    // beams framing the opening
    mesh.merge(place(
        cuboid(Vec3::new(w - 1.2, 0.8, 0.8), BEAM_COLOR),
        Vec3::new(0.0, h - 1.4, d * 0.5 - 0.6),
    ));
    mesh.merge(place(
        cuboid(Vec3::new(w - 1.2, 0.6, 0.8), BEAM_COLOR),
        Vec3::new(0.0, 2.4, d * 0.5 - 0.6),
    ));

    // counter trim under the lower beam, closing the front below the stage
    mesh.merge(place(
        cuboid(Vec3::new(w, 2.1, 0.4), TRIM_COLOR),
        Vec3::new(0.0, 1.05, d * 0.5 - 0.2),
    ));

    mesh
}

/// Still water volume below the animated surface sheet.
pub fn water_volume(layout: &SceneLayout) -> MeshBuffer {
    let volume_height = (layout.water_surface_y - layout.water_bottom_y) - 0.06;
    let center_y = layout.water_bottom_y + 0.5 * volume_height;
    place(
        cuboid(
            Vec3::new(layout.water_width_m, volume_height, layout.water_depth_m),
            WATER_BODY_COLOR,
        ),
        Vec3::new(0.0, center_y, layout.water_center_z),
    )
}

/// Support rail along the front of the tank.
pub fn front_rail(layout: &SceneLayout) -> MeshBuffer {
    place(
        cuboid(
            Vec3::new(layout.water_width_m + 2.0, 0.3, 0.6),
            RAIL_COLOR,
        ),
        Vec3::new(
            0.0,
            layout.water_surface_y + 0.15,
            layout.water_front_z() + 0.4,
        ),
    )
}

/// The full static set as one mesh.
pub fn static_set(layout: &SceneLayout) -> MeshBuffer {
    let mut mesh = ground(layout);
    mesh.merge(booth(layout));
    mesh.merge(water_volume(layout));
    mesh.merge(front_rail(layout));
    mesh
}

/// Ringed target face: white, red ring, white bull.
///
/// Layers are stacked with a hair of separation so the rings depth-test
/// cleanly.
fn target_face(radii: [(f32, f32); 3]) -> MeshBuffer {
    let mut mesh = MeshBuffer::new();
    for (layer, &(inner, outer)) in radii.iter().enumerate() {
        let color = if layer == 1 { TARGET_RED } else { TARGET_WHITE };
        mesh.merge(place(
            disk(inner, outer, 32, color),
            Vec3::new(0.0, 0.0, 0.004 * layer as f32),
        ));
    }
    mesh
}

/// The duck, in local space, facing +Z with its waterline at y = 0.
pub fn duck() -> MeshBuffer {
    let body_length = 2.6_f32;
    let body_height = 1.8_f32;
    let body_width = 1.6_f32;

    let mut mesh = MeshBuffer::new();

    // body ellipsoid
    mesh.merge(sphere(0.5, 32, 32, DUCK_BODY_COLOR).transformed(Mat4::from_scale(Vec3::new(
        body_width,
        body_height,
        body_length,
    ))));

    // wings, canted out
    for side in [-1.0_f32, 1.0] {
        mesh.merge(
            cuboid(
                Vec3::new(body_width * 0.5, body_height * 0.7, body_length * 0.35),
                DUCK_WING_COLOR,
            )
            .transformed(Mat4::from_rotation_translation(
                Quat::from_rotation_z(side * 25.0_f32.to_radians()),
                Vec3::new(side * body_width * 0.55, 0.05, -0.2),
            )),
        );
    }

    // tail plank, tipped up
    mesh.merge(
        cuboid(
            Vec3::new(body_width * 0.45, 0.2, body_length * 0.6),
            DUCK_WING_COLOR,
        )
        .transformed(Mat4::from_rotation_translation(
            Quat::from_rotation_x(25.0_f32.to_radians()),
            Vec3::new(0.0, -0.3, -body_length * 0.45),
        )),
    );

    // head, beak, eyes and the chest target all hang off the head anchor
    let head = Mat4::from_translation(Vec3::new(0.0, body_height * 0.65, body_length * 0.2));

    mesh.merge(
        sphere(0.5, 24, 24, DUCK_BODY_COLOR)
            .transformed(head * Mat4::from_scale(Vec3::splat(0.9))),
    );
    mesh.merge(
        cone(0.22, 0.6, 20, DUCK_BEAK_COLOR)
            .transformed(head * Mat4::from_translation(Vec3::new(0.0, -0.05, 0.55))),
    );
    for side in [-1.0_f32, 1.0] {
        mesh.merge(
            sphere(0.5, 12, 12, DUCK_EYE_COLOR).transformed(
                head * Mat4::from_translation(Vec3::new(side * 0.22, 0.15, 0.35))
                    * Mat4::from_scale(Vec3::splat(0.12)),
            ),
        );
    }
    mesh.merge(
        target_face([(0.0, 0.7), (0.35, 0.55), (0.0, 0.22)])
            .transformed(head * Mat4::from_translation(Vec3::new(0.0, -0.35, 0.55))),
    );

    mesh
}

/// The bare ringed target, in local space, facing +Z.
pub fn standalone_target() -> MeshBuffer {
    target_face([(0.0, 0.75), (0.4, 0.6), (0.0, 0.25)])
}
