//! Edge case and boundary condition tests for decoding, mapping and drawing

use joydrive::{
    actuator::{servo_duty, SERVO_DUTY_MAX, SERVO_DUTY_MIN},
    display::{Framebuffer, Ssd1306, StatusScreen, PAGES, WIDTH},
    hal::{MockBus, MockDelay},
    kinematics::{direction_for, drive_duty, normalize_angle, raw_angle},
    map_frame, Direction, FoldMode, JoystickFrame, KinematicsConfig, FRAME_LEN,
};

// ============================================================================
// Frame Length
// ============================================================================

#[test]
fn only_six_byte_buffers_decode() {
    let bytes = [0xAAu8; 16];
    for len in 0..bytes.len() {
        assert_eq!(
            JoystickFrame::decode(&bytes[..len]).is_some(),
            len == FRAME_LEN,
            "len {len}"
        );
    }
}

#[test]
fn extreme_values_decode() {
    let frame = JoystickFrame::decode(&[0x00, 0x80, 0xFF, 0x7F, 0xFF, 0xFF]).unwrap();
    assert_eq!(frame, JoystickFrame::new(i16::MIN, i16::MAX, -1));
}

// ============================================================================
// Direction and Duty
// ============================================================================

#[test]
fn zero_y_is_stop_with_zero_duty() {
    let cfg = KinematicsConfig::default();
    assert_eq!(direction_for(0), Direction::Stop);
    assert_eq!(drive_duty(0, &cfg), 0);

    let cmd = map_frame(&JoystickFrame::new(200, 0, 0), &cfg);
    assert_eq!(cmd.direction, Direction::Stop);
    assert_eq!(cmd.motor_duty, 0);
}

#[test]
fn duty_at_one_count() {
    let cfg = KinematicsConfig::default();
    // 1 * 1023 / 200 truncates to 5
    assert_eq!(drive_duty(1, &cfg), 5);
    assert_eq!(drive_duty(-1, &cfg), 5);
}

#[test]
fn duty_never_exceeds_ten_bits() {
    let cfg = KinematicsConfig::default().with_speed_scale(u16::MAX as u32);
    for y in [i16::MIN, -201, 201, i16::MAX] {
        assert_eq!(drive_duty(y, &cfg), 1023);
    }
}

// ============================================================================
// Angle Boundaries
// ============================================================================

#[test]
fn fold_boundary_at_plus_ninety() {
    // stick full left gives exactly +90 after sign inversion
    assert_eq!(raw_angle(-200, 0, FoldMode::Inward), 0.0);
    assert_eq!(raw_angle(-200, 0, FoldMode::Outward), 180.0);
}

#[test]
fn fold_boundary_at_minus_ninety() {
    assert_eq!(raw_angle(200, 0, FoldMode::Inward), 0.0);
    assert_eq!(raw_angle(200, 0, FoldMode::Outward), -180.0);
}

#[test]
fn angle_inside_deadzone_is_exactly_zero() {
    for cfg in [KinematicsConfig::narrow(), KinematicsConfig::wide()] {
        let dz = cfg.deadzone;
        for angle in [0.0, 0.5, dz / 2.0, dz, -0.5, -dz] {
            assert_eq!(normalize_angle(angle, &cfg), 0.0, "{angle}");
        }
    }
}

#[test]
fn swing_is_capped_both_ways() {
    let cfg = KinematicsConfig::narrow();
    assert_eq!(normalize_angle(179.0, &cfg), 40.0);
    assert_eq!(normalize_angle(-179.0, &cfg), -40.0);
}

#[test]
fn zero_stick_is_straight() {
    let cmd = map_frame(&JoystickFrame::default(), &KinematicsConfig::default());
    assert_eq!(cmd.steer_angle, 90.0);
    assert_eq!(cmd.servo_angle(), 90);
}

// ============================================================================
// Servo Duty
// ============================================================================

#[test]
fn servo_duty_endpoints() {
    assert_eq!(servo_duty(0, SERVO_DUTY_MIN, SERVO_DUTY_MAX), SERVO_DUTY_MIN);
    assert_eq!(servo_duty(180, SERVO_DUTY_MIN, SERVO_DUTY_MAX), SERVO_DUTY_MAX);
    assert_eq!(servo_duty(u32::MAX, SERVO_DUTY_MIN, SERVO_DUTY_MAX), SERVO_DUTY_MAX);
}

// ============================================================================
// Display
// ============================================================================

#[test]
fn drawing_past_the_edges_is_clipped() {
    for x in 0..=WIDTH + 5 {
        for page in 0..=PAGES {
            let mut fb = Framebuffer::new();
            fb.draw_string(x, page, "W8");
            if page >= PAGES || x >= WIDTH {
                assert!(fb.as_bytes().iter().all(|b| *b == 0), "x {x} page {page}");
            }
        }
    }
}

#[test]
fn clear_then_flush_sends_zero_pages() {
    let mut panel = Ssd1306::new(MockBus::new());
    panel.init(&mut MockDelay::new(), 100).unwrap();
    StatusScreen::Banner { name: "joydrive" }.render(panel.framebuffer_mut());
    panel.framebuffer_mut().clear();
    panel.bus_mut().writes.clear();
    panel.flush().unwrap();

    let pages: Vec<_> = panel.bus().data_writes().collect();
    assert_eq!(pages.len(), PAGES);
    assert!(pages.iter().all(|p| p.len() == WIDTH && p.iter().all(|b| *b == 0)));
}

#[test]
fn flush_failure_mid_panel() {
    let mut panel = Ssd1306::new(MockBus::new());
    panel.framebuffer_mut().draw_string(0, 0, "A");
    // two full pages, then the third page's select fails
    panel.bus_mut().fail_after(8);
    assert!(panel.flush().is_err());
    assert_eq!(panel.bus().data_writes().count(), 2);
    assert_ne!(panel.framebuffer().page(0).unwrap()[0], 0);
}

#[test]
fn print_fmt_truncates_long_output() {
    let mut fb = Framebuffer::new();
    fb.print_fmt(0, 0, format_args!("{}", "9".repeat(500)));
    // 21 full glyphs plus two columns on one page, nothing elsewhere
    assert!(fb.page(0).unwrap().iter().any(|b| *b != 0));
    for page in 1..PAGES {
        assert!(fb.page(page).unwrap().iter().all(|b| *b == 0));
    }
}
