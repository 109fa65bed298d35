//! Permission Flow
//!
//! This example walks a camera feature through the permission flow
//! against a simulated host.
//!
//! Key concepts:
//! - The flow re-checks the live grant status on every dispatch
//! - Rationale is shown once the host suggests it
//! - Results arrive asynchronously and are fed back by the caller
//! - State survives a save/restore cycle
//!
//! Run with: cargo run --example permission_flow

use permflow::core::Action;
use permflow::permission::{
    launch_application_details_settings, GrantResult, PermissionFlow, PermissionHost,
    SettingsIntent, SettingsLauncher,
};
use permflow::persist::Bundle;
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

const CAMERA_REQUEST: i32 = 7;

#[derive(Default)]
struct SimulatedHost {
    granted: RefCell<HashSet<String>>,
    asked: RefCell<HashSet<String>>,
    pending: RefCell<Option<Vec<String>>>,
}

impl PermissionHost for SimulatedHost {
    fn check_permission(&self, permission: &str) -> GrantResult {
        if self.granted.borrow().contains(permission) {
            GrantResult::Granted
        } else {
            GrantResult::Denied
        }
    }

    // Suggest rationale once the user has said no at least once.
    fn should_show_rationale(&self, permission: &str) -> bool {
        self.asked.borrow().contains(permission) && !self.granted.borrow().contains(permission)
    }

    fn request_permissions(&self, permissions: &[String], request_code: i32) {
        println!("  host: system dialog for {permissions:?} (code {request_code})");
        *self.pending.borrow_mut() = Some(permissions.to_vec());
    }
}

struct PrintingLauncher;

impl SettingsLauncher for PrintingLauncher {
    fn open(&self, intent: &SettingsIntent) {
        println!("  settings: opening {}", intent.uri);
    }
}

/// Simulate the user answering the pending system dialog.
fn answer(host: &SimulatedHost, flow: &mut PermissionFlow, allow: bool) {
    let Some(permissions) = host.pending.borrow_mut().take() else {
        return;
    };
    let results: Vec<GrantResult> = permissions
        .iter()
        .map(|p| {
            host.asked.borrow_mut().insert(p.clone());
            if allow {
                host.granted.borrow_mut().insert(p.clone());
                GrantResult::Granted
            } else {
                GrantResult::Denied
            }
        })
        .collect();

    flow.deliver_request_result(CAMERA_REQUEST, Some(&permissions[..]), Some(&results[..]))
        .expect("result arrays have matching lengths");
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("permflow=debug")
        .init();

    println!("=== Permission Flow Example ===\n");

    let host = Rc::new(SimulatedHost::default());
    let build = || {
        PermissionFlow::builder(CAMERA_REQUEST, ["android.permission.CAMERA"])
            .activity(Rc::clone(&host) as Rc<dyn PermissionHost>)
            .modal(true)
            .on_granted(Action::new(|| println!("  app: camera opened")))
            .on_rationale(Action::new(|| println!("  app: explaining why the camera is needed")))
            .on_denied(Action::new(|| println!("  app: camera denied, will ask again later")))
            .on_denied_permanently(Action::new(|| {
                println!("  app: camera blocked, only settings can help")
            }))
            .build()
            .expect("flow configuration is valid")
    };

    let mut flow = build();
    flow.set_debug(true);

    println!("Step 1: first attempt asks the host");
    flow.dispatch().expect("dispatch");
    answer(&host, &mut flow, false);
    println!("  state: {:?}\n", flow.current_state());

    println!("Step 2: second attempt shows rationale first");
    flow.dispatch().expect("dispatch");
    flow.accept_rationale().expect("accept");
    answer(&host, &mut flow, true);
    println!("  state: {:?}\n", flow.current_state());

    println!("Step 3: state survives a restart");
    let mut bundle = Bundle::new();
    flow.save_state(&mut bundle).expect("save");
    let encoded = bundle.to_bytes().expect("encode");
    let mut flow = build();
    flow.restore_state(&Bundle::from_bytes(&encoded).expect("decode"))
        .expect("restore");
    println!("  state: {:?}\n", flow.current_state());

    println!("Step 4: revoked in settings, noticed on next attempt");
    host.granted.borrow_mut().clear();
    flow.dispatch().expect("dispatch");
    launch_application_details_settings(&PrintingLauncher, "com.example.camera");
    println!("  state: {:?}", flow.current_state());

    println!("\n=== Example Complete ===");
}
