use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use buildify::{
    Context, Engine, EngineConfig, Entity, Gaussian, GlRenderer, Quaternionf, Result, Transform,
    Vector3f,
};

/// Builds a small demo scene, runs a few engine ticks and fills a gaussian scene.
#[derive(Parser, Debug)]
#[command(name = "buildify", version, about)]
struct Args {
    /// TOML engine configuration.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of gaussians to generate.
    #[arg(short, long, default_value_t = 100)]
    gaussians: usize,

    /// Engine ticks to simulate.
    #[arg(short, long, default_value_t = 3)]
    frames: u32,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let mut engine = Engine::new();
    engine.set_renderer(Box::new(GlRenderer::new()));
    engine.initialize(args.config.as_deref())?;

    let scene = engine.create_scene("Main");
    {
        let mut scene = scene.borrow_mut();
        let camera = scene.create_entity(
            Entity::new_camera("Camera")
                .with_transform(Transform::from_position(Vector3f::new(0.0, 2.0, 10.0))),
        );
        scene.set_active_camera(&camera)?;

        scene.create_entity(Entity::new("Spinner").on_update(|transform, dt| {
            let step = Quaternionf::from_axis_angle(Vector3f::new(0.0, 1.0, 0.0), dt as f32);
            transform.rotation = step * transform.rotation;
        }));
    }

    let dt = 1.0 / 60.0;
    for _ in 0..args.frames {
        engine.update(dt);
        engine.render()?;
    }

    let mut context = Context::new();
    context.initialize();
    let gaussians = context.create_scene()?;
    {
        let mut gaussians = gaussians.borrow_mut();
        let n = args.gaussians.max(1) as f32;
        gaussians.extend((0..args.gaussians).map(|i| {
            let t = i as f32 / n;
            Gaussian::at([t * 10.0 - 5.0, 0.0, 0.0])
        }));
    }

    let gaussians = gaussians.borrow();
    println!(
        "Scene '{}': {} entities, {} frames",
        scene.borrow().name(),
        scene.borrow().entity_count(),
        args.frames
    );
    println!(
        "Gaussian scene: {} gaussians, {} parameters, loss {:.3}",
        gaussians.count(),
        gaussians.parameters().len(),
        gaussians.compute_rendering_loss()
    );

    engine.shutdown();
    Ok(())
}
