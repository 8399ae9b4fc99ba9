//! Resource Pack Manager CLI
//!
//! Inspect resource packs and resolve block models from the command line.

use clap::{Parser, Subcommand};
use resource_pack_manager::manager::{LogProgress, TransparencyLoad};
use resource_pack_manager::{
    Block, BlockMeshCullDirection, BlockStack, DirectoryBackend, ManagerConfig,
    ResourcePackManager,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resource-pack-manager")]
#[command(author, version, about = "Resolve Minecraft blocks to cached block meshes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the model of a block stack (useful for testing)
    Block {
        /// Blocks in the stack, base block first (e.g., "minecraft:oak_slab[type=bottom]")
        #[arg(short, long, required = true)]
        block: Vec<Block>,

        /// Resource pack directories, lowest priority first
        #[arg(short, long, required = true)]
        resource_pack: Vec<PathBuf>,

        /// Transparency cache file to warm-start from
        #[arg(short, long)]
        transparency_cache: Option<PathBuf>,

        /// Write the transparency cache back after resolving
        #[arg(long, requires = "transparency_cache")]
        save_transparency: bool,
    },

    /// Show information about resource packs
    Info {
        /// Resource pack directories, lowest priority first
        #[arg(short, long, required = true)]
        resource_pack: Vec<PathBuf>,

        /// Transparency cache file to warm-start from
        #[arg(short, long)]
        transparency_cache: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Block {
            block,
            resource_pack,
            transparency_cache,
            save_transparency,
        } => {
            resolve_block_stack(block, resource_pack, transparency_cache, save_transparency)?;
        }
        Commands::Info {
            resource_pack,
            transparency_cache,
        } => {
            show_pack_info(resource_pack, transparency_cache)?;
        }
    }

    Ok(())
}

fn load_manager(
    resource_packs: Vec<PathBuf>,
    transparency_cache: Option<PathBuf>,
) -> Result<ResourcePackManager<DirectoryBackend>, Box<dyn std::error::Error>> {
    let mut config = ManagerConfig::default();
    if let Some(path) = transparency_cache {
        config = config.with_transparency_cache(path);
    }

    let mut manager =
        ResourcePackManager::with_config(DirectoryBackend::new(resource_packs), config);
    manager.reload_with_progress(&mut LogProgress::new())?;
    Ok(manager)
}

fn resolve_block_stack(
    blocks: Vec<Block>,
    resource_packs: Vec<PathBuf>,
    transparency_cache: Option<PathBuf>,
    save_transparency: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut manager = load_manager(resource_packs, transparency_cache)?;

    let stack = BlockStack::from_blocks(blocks)?;
    println!("Resolving block stack: {}", stack);

    let mesh = manager.get_block_model(&stack)?;

    println!(
        "  Generated {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    println!("  Transparency: {:?}", mesh.transparency);
    for cull in BlockMeshCullDirection::ALL {
        if let Some(part) = mesh.part(cull) {
            println!(
                "  {:?}: {} vertices, {} triangles",
                cull,
                part.vertex_count(),
                part.triangle_count()
            );
        }
    }
    println!("  Textures:");
    for texture in &mesh.textures {
        println!("    {}", texture);
    }

    if save_transparency {
        if let Some(path) = manager.config().transparency_cache_path.clone() {
            manager.save_transparency_cache(&path)?;
            println!(
                "Saved {} transparency entries to {:?}",
                manager.transparency().len(),
                path
            );
        }
    }

    Ok(())
}

fn show_pack_info(
    resource_packs: Vec<PathBuf>,
    transparency_cache: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut manager = load_manager(resource_packs, None)?;

    println!("\nResource Pack Info:");
    for (i, path) in manager.pack_paths().iter().enumerate() {
        println!("  Pack {}: {:?}", i, path);
    }
    println!("  Textures: {}", manager.textures().len());
    println!("  Missing texture: {}", manager.get_texture_path(None, manager.missing_no()));

    if let Some(path) = transparency_cache {
        match manager.load_transparency_cache(&path) {
            TransparencyLoad::Loaded(count) => {
                println!("  Transparency cache: {} entries", count)
            }
            TransparencyLoad::Absent => println!("  Transparency cache: not found"),
            TransparencyLoad::Unreadable(e) | TransparencyLoad::Malformed(e) => {
                println!("  Transparency cache: invalid ({})", e)
            }
        }
    }

    Ok(())
}
