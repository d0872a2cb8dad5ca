//! Card Motion entry point
//!
//! Native builds replay a scripted gesture headlessly and print the card
//! transform; the wasm build is driven from JS through `card_motion::wasm`.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use card_motion::TuningPreset;

    env_logger::init();

    let mut preset = TuningPreset::Classic;
    let mut json = false;
    for arg in std::env::args().skip(1) {
        if arg == "--json" {
            json = true;
        } else if let Some(p) = TuningPreset::from_str(&arg) {
            preset = p;
        } else {
            log::warn!("Ignoring unknown argument '{}'", arg);
        }
    }

    log::info!("Card Motion (native) replaying with {} preset", preset.as_str());
    replay(preset, json);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is card_motion::wasm::wasm_start, this is just to satisfy the compiler
}

/// Entry, a right-to-left flick, then hands off until the card rests
#[cfg(not(target_arch = "wasm32"))]
fn replay(preset: card_motion::TuningPreset, json: bool) {
    use card_motion::consts::FIXED_DT;
    use card_motion::{CardDriver, CardTransform, MotionPhase, Settings, TouchEvent};
    use glam::Vec2;

    let mut driver = CardDriver::from_settings(&Settings::from_preset(preset));

    const GRANT_FRAME: u32 = 90;
    const MOVE_FRAMES: u32 = 8;
    const MAX_FRAMES: u32 = 60 * 20;

    let mut frame = 0u32;
    loop {
        let now = frame as f64 * FIXED_DT as f64;
        if frame == GRANT_FRAME {
            driver.push(TouchEvent::Grant {
                point: Vec2::new(300.0, 400.0),
                timestamp: now,
            });
        } else if frame > GRANT_FRAME && frame <= GRANT_FRAME + MOVE_FRAMES {
            let travelled = (frame - GRANT_FRAME) as f32 * -35.0;
            driver.push(TouchEvent::Move {
                point: Vec2::new(300.0 + travelled, 400.0),
                timestamp: now,
            });
        } else if frame == GRANT_FRAME + MOVE_FRAMES + 1 {
            driver.push(TouchEvent::Release);
        }

        let transform = driver.frame(FIXED_DT, &mut |_: CardTransform| {});
        let phase = driver.phase();
        let released = frame > GRANT_FRAME + MOVE_FRAMES;
        let gliding = driver.controller().state().angular_velocity != 0.0;
        let at_rest = released && phase == MotionPhase::Idle && !gliding;

        if frame % 10 == 0 || at_rest {
            if json {
                let line = serde_json::json!({
                    "frame": frame,
                    "phase": phase.as_str(),
                    "position_y": transform.position_y,
                    "rotation_y": transform.rotation_y,
                });
                println!("{}", line);
            } else {
                println!(
                    "frame {:>4}  {:<9} y={:>8.4} yaw={:>8.4}",
                    frame,
                    phase.as_str(),
                    transform.position_y,
                    transform.rotation_y
                );
            }
        }

        if at_rest {
            log::info!("Card at rest after {} frames", frame + 1);
            break;
        }
        if frame >= MAX_FRAMES {
            log::warn!("Card still moving after {} frames", MAX_FRAMES);
            break;
        }
        frame += 1;
    }
}
