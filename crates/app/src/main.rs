//! Entry point for Svarog3D.
//! Loads an OBJ mesh (optionally uploading it to the GPU) and plays a
//! position tween on a game object, logging the motion.

use std::path::PathBuf;

use anyhow::{Context, Result};
use asset::{CpuDevice, MeshData, load_obj_mesh};
use corelib::ecs::{TweenComponent, World};
use corelib::time::GameClock;
use corelib::transform::Transform;
use corelib::tween::{TweenMethod, TweenPosition};
use corelib::{Vec3, vec3};
use renderer::GpuContext;

/// Safety net for the frame loop when the tween never completes.
const MAX_FRAMES: u32 = 100_000;

fn parse_backend_arg(args: &[String]) -> wgpu::Backends {
    // Accept: --gpu-backend=auto|vulkan|dx12|metal|gl
    let mut backends = wgpu::Backends::all(); // default = auto
    for arg in args {
        if let Some(val) = arg.strip_prefix("--gpu-backend=") {
            backends = match val.to_ascii_lowercase().as_str() {
                "auto" => wgpu::Backends::all(),
                "vulkan" | "vk" => wgpu::Backends::VULKAN,
                "dx12" | "d3d12" => wgpu::Backends::DX12,
                "metal" | "mtl" => wgpu::Backends::METAL,
                "gl" | "opengl" | "gles" => wgpu::Backends::GL,
                other => {
                    log::warn!("Unknown backend '{}', falling back to auto.", other);
                    wgpu::Backends::all()
                }
            };
        }
    }
    backends
}

fn parse_obj_arg(args: &[String]) -> Option<PathBuf> {
    args.iter()
        .filter_map(|arg| arg.strip_prefix("--obj="))
        .last()
        .map(PathBuf::from)
}

fn parse_upload_arg(args: &[String]) -> bool {
    // --upload[=on|off], off by default
    for arg in args {
        if arg == "--upload" {
            return true;
        }
        if let Some(val) = arg.strip_prefix("--upload=") {
            return matches!(
                val.to_ascii_lowercase().as_str(),
                "1" | "true" | "on" | "yes"
            );
        }
    }
    false
}

fn parse_method_arg(args: &[String]) -> TweenMethod {
    let mut method = TweenMethod::default();
    for arg in args {
        if let Some(val) = arg.strip_prefix("--tween-method=") {
            method = match val.parse() {
                Ok(m) => m,
                Err(err) => {
                    log::warn!("{}, falling back to {}.", err, TweenMethod::default());
                    TweenMethod::default()
                }
            };
        }
    }
    method
}

fn parse_f32_arg(args: &[String], prefix: &str, default: f32) -> f32 {
    args.iter()
        .filter_map(|arg| arg.strip_prefix(prefix))
        .filter_map(|v| v.parse::<f32>().ok())
        .last()
        .unwrap_or(default)
}

fn parse_target_arg(args: &[String]) -> Vec3 {
    // --to=x,y,z
    let mut target = vec3(10.0, 0.0, 0.0);
    for arg in args {
        if let Some(v) = arg.strip_prefix("--to=") {
            let parts: Vec<f32> = v.split(',').filter_map(|p| p.trim().parse().ok()).collect();
            if let [x, y, z] = parts[..] {
                target = vec3(x, y, z);
            } else {
                log::warn!("Ignoring malformed --to='{}' (expected x,y,z).", v);
            }
        }
    }
    target
}

fn log_mesh(path: &std::path::Path, data: Option<&MeshData>) {
    match data {
        Some(data) => log::info!(
            "Mesh {}: {} vertices, {} indices",
            path.display(),
            data.vertices.len(),
            data.indices.len()
        ),
        None => log::warn!("No mesh loaded from {}", path.display()),
    }
}

fn load_mesh(path: &std::path::Path, upload: bool, backends: wgpu::Backends) -> Result<()> {
    if upload {
        let gpu = GpuContext::new_blocking(backends)?;
        let mesh = load_obj_mesh(path, &gpu)
            .with_context(|| format!("Failed to load OBJ {}", path.display()))?;
        if let Some(mesh) = &mesh {
            log::info!(
                "Uploaded {} {:?} indices to {}",
                mesh.buffers().index_count,
                mesh.buffers().index_format,
                gpu.adapter_info().name
            );
        }
        log_mesh(path, mesh.as_deref().map(|m| m.data()));
    } else {
        let mesh = load_obj_mesh(path, &CpuDevice)
            .with_context(|| format!("Failed to load OBJ {}", path.display()))?;
        log_mesh(path, mesh.as_deref().map(|m| m.data()));
    }
    Ok(())
}

/// Run a position tween on a fresh entity until it completes.
/// Returns the final translation.
fn run_tween_demo(method: TweenMethod, duration: f32, target: Vec3, fps: f32) -> Result<Vec3> {
    let mut world = World::new();
    let entity = world.spawn(Transform::identity());
    let tween = TweenPosition::new(method, Vec3::ZERO, target, duration);
    world.attach_tween(entity, TweenComponent::Position(tween))?;

    let mut clock = GameClock::new();
    world.start_tween(entity, &clock.now());

    let dt = 1.0 / fps.max(1.0);
    let log_every = (fps.max(1.0) as u32 / 4).max(1);
    for frame in 1..=MAX_FRAMES {
        let time = clock.tick(dt);
        let completed = world.system_tweens(&time);
        let pos = world
            .transform(entity)
            .map(|t| t.translation)
            .unwrap_or_default();
        if completed > 0 {
            log::info!("t={:.3}s tween done at {:?}", time.total, pos);
            return Ok(pos);
        }
        if frame % log_every == 0 {
            log::info!("t={:.3}s position={:?}", time.total, pos);
        }
    }

    anyhow::bail!("Tween did not finish within {} frames", MAX_FRAMES)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let backends = parse_backend_arg(&args);
    let upload = parse_upload_arg(&args);
    let method = parse_method_arg(&args);
    let duration = parse_f32_arg(&args, "--duration=", 2.0);
    let fps = parse_f32_arg(&args, "--fps=", 60.0);
    let target = parse_target_arg(&args);
    log::info!(
        "Starting Svarog3D. Backend: {:?}, upload={}, tween={} over {}s to {:?}",
        backends,
        upload,
        method,
        duration,
        target
    );

    if let Some(path) = parse_obj_arg(&args) {
        load_mesh(&path, upload, backends)?;
    }

    run_tween_demo(method, duration, target, fps)?;

    log::info!("Graceful shutdown. Bye!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_flags() {
        let a = args(&[
            "--gpu-backend=vk",
            "--upload",
            "--tween-method=bounceeaseout",
            "--duration=0.5",
            "--to=1, 2,3",
            "--obj=mesh.obj",
        ]);
        assert_eq!(parse_backend_arg(&a), wgpu::Backends::VULKAN);
        assert!(parse_upload_arg(&a));
        assert_eq!(parse_method_arg(&a), TweenMethod::BounceEaseOut);
        assert_eq!(parse_f32_arg(&a, "--duration=", 2.0), 0.5);
        assert_eq!(parse_target_arg(&a), vec3(1.0, 2.0, 3.0));
        assert_eq!(parse_obj_arg(&a), Some(PathBuf::from("mesh.obj")));
    }

    #[test]
    fn falls_back_on_bad_values() {
        let a = args(&["--tween-method=wobble", "--to=1,2", "--fps=fast"]);
        assert_eq!(parse_method_arg(&a), TweenMethod::Linear);
        assert_eq!(parse_target_arg(&a), vec3(10.0, 0.0, 0.0));
        assert_eq!(parse_f32_arg(&a, "--fps=", 60.0), 60.0);
        assert!(!parse_upload_arg(&a));
        assert!(parse_obj_arg(&a).is_none());
    }

    #[test]
    fn demo_ends_on_target() {
        let end = vec3(3.0, -1.0, 2.0);
        let pos = run_tween_demo(TweenMethod::ElasticEaseOut, 0.25, end, 30.0).unwrap();
        assert_eq!(pos, end);
    }
}
