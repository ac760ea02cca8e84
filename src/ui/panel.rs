//! Control panels of the viewer

use crate::controls::{
    DroneControls, CAMERA_POSITION_RANGE, CAMERA_ROTATION_RANGE, ROTATION_RANGE, SCALE_RANGE,
};

/// "Drone Options": drone rotation, scale and the axis toggle
pub fn drone_options(ui: &imgui::Ui, controls: &mut DroneControls) {
    ui.window("Drone Options")
        .size([320.0, 150.0], imgui::Condition::FirstUseEver)
        .position([20.0, 20.0], imgui::Condition::FirstUseEver)
        .build(|| {
            let (min, max) = (*ROTATION_RANGE.start(), *ROTATION_RANGE.end());
            ui.slider("Rotation Y", min, max, &mut controls.rotation_y);
            ui.slider("Rotation X", min, max, &mut controls.rotation_x);
            ui.slider(
                "Scale",
                *SCALE_RANGE.start(),
                *SCALE_RANGE.end(),
                &mut controls.scale,
            );
            ui.checkbox("Show axes", &mut controls.show_axes);
        });
}

/// "Camera Options": camera position and rotation per axis
pub fn camera_options(ui: &imgui::Ui, controls: &mut DroneControls) {
    ui.window("Camera Options")
        .size([320.0, 200.0], imgui::Condition::FirstUseEver)
        .position([20.0, 190.0], imgui::Condition::FirstUseEver)
        .build(|| {
            let (min, max) = (*CAMERA_POSITION_RANGE.start(), *CAMERA_POSITION_RANGE.end());
            let [x, y, z] = &mut controls.camera_position;
            ui.slider("Position X", min, max, x);
            ui.slider("Position Y", min, max, y);
            ui.slider("Position Z", min, max, z);

            ui.separator();

            let (min, max) = (*CAMERA_ROTATION_RANGE.start(), *CAMERA_ROTATION_RANGE.end());
            let [x, y, z] = &mut controls.camera_rotation;
            ui.slider("Rotation X", min, max, x);
            ui.slider("Rotation Y", min, max, y);
            ui.slider("Rotation Z", min, max, z);
        });
}
