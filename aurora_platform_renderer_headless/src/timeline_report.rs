/// Colored console summary of a headless run

use colored::*;

use crate::gpu_timeline::{HeadlessProbe, TimelineStats};

/// Print the counters collected by a headless device
pub fn print_timeline_report(probe: &HeadlessProbe) {
    let stats = probe.stats();

    if stats.devices_created == 0 {
        println!("\n{}", "✓ No headless device was created".green().bold());
        return;
    }

    println!("\n{}", "=== Headless Timeline Report ===".bright_blue().bold());

    println!("  {} {}", "Devices:".white().bold(), stats.devices_created);
    println!(
        "  {} {} submitted, {} presented",
        "Frames:".white().bold(),
        stats.frames_submitted,
        stats.frames_presented
    );
    println!("  {} {}", "Draw calls:".cyan(), stats.draw_calls);
    println!(
        "  {} {} signaled, {} completed",
        "Fences:".cyan(),
        stats.fences_signaled,
        stats.completed_fence
    );
    println!("  {} {}", "Max in flight:".cyan(), stats.max_frames_in_flight);
    if stats.view_generations > 1 {
        println!(
            "  {} {} ({} surface resizes)",
            "View generations:".cyan(),
            stats.view_generations,
            stats.surface_resizes
        );
    }
    if stats.cpu_stalls > 0 {
        println!("  {} {}", "CPU stalls:".yellow().bold(), stats.cpu_stalls);
    }
    if has_leaks(&stats) {
        println!(
            "  {} {} buffers ({} bytes), {} shaders",
            "Leaked:".red().bold(),
            stats.live_buffers,
            stats.buffer_bytes,
            stats.live_shaders
        );
    }
    if probe.is_device_lost() {
        println!("  {}", "Device lost".red().bold());
    }

    println!("{}\n", "================================".bright_blue().bold());
}

/// True when resources are still alive
pub fn has_leaks(stats: &TimelineStats) -> bool {
    stats.live_buffers > 0 || stats.live_shaders > 0
}
