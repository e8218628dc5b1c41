//! Frame-to-actuator tests driving the control loop through the mock HAL

use joydrive::{
    display::{Framebuffer, Ssd1306, PAGES, WIDTH},
    hal::{MockBus, MockMotor, MockServo},
    kinematics::SERVO_CENTER,
    ControlLoop, Direction, FoldMode, FrameHandler, JoystickFrame, KinematicsConfig,
    StatusReporter,
};

type TestLoop = ControlLoop<MockMotor, MockServo, MockBus>;

fn control_with(kinematics: KinematicsConfig) -> TestLoop {
    ControlLoop::new(
        MockMotor::new(),
        MockServo::new(),
        Ssd1306::new(MockBus::new()),
        kinematics,
    )
}

fn control() -> TestLoop {
    control_with(KinematicsConfig::narrow())
}

fn feed(ctl: &mut TestLoop, bytes: &[u8]) -> bool {
    match JoystickFrame::decode(bytes) {
        Some(frame) => {
            ctl.on_frame(&frame);
            true
        }
        None => false,
    }
}

// ============================================================================
// Wire to Actuators
// ============================================================================

#[test]
fn full_forward_bytes() {
    let mut ctl = control();
    assert!(feed(&mut ctl, &[0x00, 0x00, 0xC8, 0x00, 0x00, 0x01]));

    assert_eq!(ctl.motor().direction, Direction::Forward);
    assert_eq!(ctl.motor().duty, 1023);
    assert_eq!(ctl.servo().angle, 90);
    assert_eq!(ctl.servo().duty, 76);
}

#[test]
fn short_datagram_leaves_actuators_untouched() {
    let mut ctl = control();
    feed(&mut ctl, &JoystickFrame::new(0, 120, 0).encode());
    let before = (ctl.motor().direction, ctl.motor().duty, ctl.servo().angle);
    let writes_before = ctl.panel().bus().writes.len();

    assert!(!feed(&mut ctl, &[0x00, 0x00, 0xC8, 0x00, 0x00]));

    assert_eq!(
        (ctl.motor().direction, ctl.motor().duty, ctl.servo().angle),
        before
    );
    assert_eq!(ctl.panel().bus().writes.len(), writes_before);
    assert_eq!(ctl.frames_handled(), 1);
}

#[test]
fn speed_limit_field_does_not_affect_duty() {
    let mut a = control();
    let mut b = control();
    a.on_frame(&JoystickFrame::new(0, 100, 0));
    b.on_frame(&JoystickFrame::new(0, 100, i16::MAX));
    assert_eq!(a.motor().duty, b.motor().duty);
}

#[test]
fn reverse_sets_reverse_pin() {
    let mut ctl = control();
    ctl.on_frame(&JoystickFrame::new(0, -100, 0));
    assert_eq!(ctl.motor().direction, Direction::Reverse);
    assert!(ctl.motor().reverse_pin);
    assert!(!ctl.motor().forward_pin);
    assert_eq!(ctl.motor().duty, 511);
}

#[test]
fn stick_inside_deadzone_keeps_wheels_straight() {
    let mut ctl = control();
    // atan2(30, 200) is about 8.5°
    ctl.on_frame(&JoystickFrame::new(30, 200, 0));
    assert_eq!(ctl.servo().angle, 90);
}

#[test]
fn steering_sign_follows_stick() {
    let mut right = control();
    let mut left = control();
    right.on_frame(&JoystickFrame::new(150, 150, 0));
    left.on_frame(&JoystickFrame::new(-150, 150, 0));

    // 45° raw, minus 20° deadzone
    assert_eq!(right.servo().angle, 65);
    assert_eq!(left.servo().angle, 115);
}

#[test]
fn sideways_stick_respects_fold_mode() {
    let mut inward = control_with(KinematicsConfig::narrow());
    let mut outward = control_with(KinematicsConfig::narrow().with_fold(FoldMode::Outward));
    inward.on_frame(&JoystickFrame::new(-200, 0, 0));
    outward.on_frame(&JoystickFrame::new(-200, 0, 0));

    // +90 raw: inward folds to 0, outward to 180 which saturates the swing
    assert_eq!(inward.servo().angle, 90);
    assert_eq!(outward.servo().angle, 130);
    assert_eq!(inward.motor().direction, Direction::Stop);
}

#[test]
fn wide_preset_swings_further() {
    let mut ctl = control_with(KinematicsConfig::wide());
    ctl.on_frame(&JoystickFrame::new(200, 1, 0));
    let cmd = ctl.last_command().unwrap();
    assert!(cmd.steer_angle <= SERVO_CENTER + 60.0);
    assert!(cmd.steer_angle >= SERVO_CENTER - 60.0);
    assert_eq!(ctl.servo().angle, 30);
}

#[test]
fn custom_speed_scale() {
    let mut ctl = control_with(KinematicsConfig::narrow().with_speed_scale(256));
    ctl.on_frame(&JoystickFrame::new(0, 200, 0));
    assert_eq!(ctl.motor().duty, 256);
}

#[test]
fn out_of_range_axes_are_capped() {
    let mut ctl = control();
    ctl.on_frame(&JoystickFrame::new(i16::MIN, i16::MIN, 0));
    assert_eq!(ctl.motor().duty, 1023);
    assert!(ctl.servo().angle <= 180);
}

// ============================================================================
// Display Echo
// ============================================================================

#[test]
fn echo_matches_reference_rendering() {
    let mut ctl = control();
    ctl.on_frame(&JoystickFrame::new(0, 200, 0));

    let mut want = Framebuffer::new();
    want.draw_string(0, 0, "x = 0");
    want.draw_string(0, 1, "y = 200");
    want.draw_string(0, 3, "angle = 0.00");
    assert_eq!(ctl.panel().framebuffer().as_bytes(), want.as_bytes());
}

#[test]
fn every_frame_flushes_all_pages() {
    let mut ctl = control();
    for y in [10, 20, 30] {
        ctl.on_frame(&JoystickFrame::new(0, y, 0));
    }
    let data: Vec<_> = ctl.panel().bus().data_writes().collect();
    assert_eq!(data.len(), 3 * PAGES);
    assert!(data.iter().all(|page| page.len() == WIDTH));
}

#[test]
fn listener_close_halts_and_notifies() {
    let mut ctl = control();
    ctl.on_frame(&JoystickFrame::new(0, 200, 0));
    ctl.on_listener_closed();

    assert_eq!(ctl.motor().direction, Direction::Stop);
    assert_eq!(ctl.motor().history.last(), Some(&(Direction::Stop, 0)));

    // the notice replaces the last echo
    let mut want = Framebuffer::new();
    want.draw_string(0, 5, "close Socket UDP");
    assert_eq!(ctl.panel().framebuffer().as_bytes(), want.as_bytes());
}

#[test]
fn status_screens_flush_through_same_panel() {
    let mut ctl = control();
    ctl.show_status(&joydrive::display::StatusScreen::Banner { name: "joydrive" });
    assert_eq!(ctl.panel().bus().writes.len(), PAGES * 4);
    assert_eq!(ctl.frames_handled(), 0);
}
