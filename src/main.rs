//! uvc-control binary for inspecting camera controls.
//!
//! `uvc-control list` prints every UVC device. `uvc-control [control]` opens the first one
//! and reports the named control, or every control its descriptors declare.

use uvc_control::{discover, open, ControlId, DeviceFilter, UsbTransport, UvcControl};

fn main() {
    env_logger::init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> uvc_control::Result<()> {
    let arg = std::env::args().nth(1);

    if arg.as_deref() == Some("list") {
        let devices = discover()?;
        if devices.is_empty() {
            println!("No UVC devices found");
        }
        for device in devices {
            println!("{device}");
        }
        return Ok(());
    }

    let controls = match arg {
        Some(name) => vec![name.parse::<ControlId>()?],
        None => Vec::new(),
    };

    let uvc = open(&DeviceFilter::new())?;
    let topology = uvc.topology();
    if let Some(version) = topology.uvc_version_string() {
        println!("UVC {version}");
    }
    println!(
        "Camera terminal {}, processing unit {}",
        topology.camera_terminal.id, topology.processing_unit.id
    );
    if !topology.video_standards.is_empty() {
        println!("Video standards: {:?}", topology.video_standards);
    }

    let controls = if controls.is_empty() {
        uvc.supported_controls()
    } else {
        controls
    };
    for id in controls {
        report(&uvc, id);
    }

    uvc.close()
}

fn report(uvc: &UvcControl<UsbTransport>, id: ControlId) {
    println!("{id}: {}", id.definition().description);

    match uvc.get_info(id) {
        Ok(info) => println!("  info:    {info}"),
        Err(err) => println!("  info:    {err}"),
    }
    match uvc.get_current(id) {
        Ok(value) => println!("  current: {value}"),
        Err(err) => println!("  current: {err}"),
    }
    if let Ok(range) = uvc.get_range(id) {
        println!("  range:   {range}");
    }
    if let Ok(value) = uvc.get_default(id) {
        println!("  default: {value}");
    }
}
