//! Post and image generation handlers.

use super::BriefArgs;
use postsmith_core::{AspectRatio, GeneratedImage, GeneratedPost, ImageOptions, ImageSize};
use postsmith_error::{OutputError, PostsmithResult};
use postsmith_models::{GenerationBackend, GenerationClient};
use postsmith_storage::PostRepository;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// Generate a post from `brief`, optionally with an image, and optionally save it.
///
/// A failed image, whether generation or the file write fails, does not fail
/// the command: the post is still returned (and saved), and the reason is
/// written to `notices`.
#[instrument(skip_all, fields(theme = %brief.theme, owner = %owner))]
pub async fn generate_post<B: GenerationBackend>(
    client: &GenerationClient<B>,
    repo: Option<&dyn PostRepository>,
    owner: &str,
    brief: &BriefArgs,
    image: Option<(AspectRatio, ImageSize, Option<PathBuf>)>,
    notices: &mut impl Write,
) -> PostsmithResult<GeneratedPost> {
    let generated = client.generate_post(&brief.to_brief()?).await?;
    let mut post = generated.value;

    if let Some((aspect_ratio, size, out)) = image {
        match client
            .generate_image(&post.visual_prompt, aspect_ratio, size)
            .await
        {
            Ok(image) => {
                if image.downgraded {
                    notice(
                        notices,
                        "High-resolution model unavailable; used the standard image model",
                    )?;
                }
                let path = out.unwrap_or_else(|| default_image_path(&image.value));
                match write_image(&image.value, &path).await {
                    Ok(()) => {
                        notice(notices, &format!("Image written to {}", path.display()))?;
                        post.image_options = Some(ImageOptions { aspect_ratio, size });
                    }
                    Err(e) => {
                        warn!(error = %e, "Image could not be written, keeping the post");
                        notice(notices, &format!("Image not saved: {}", e))?;
                    }
                }
            }
            Err(e) => {
                warn!(error = %e, "Image generation failed, keeping the post");
                notice(notices, &format!("Image not generated: {}", e.user_message()))?;
            }
        }
    }

    if let Some(repo) = repo {
        let saved = repo.save(owner, &brief.theme, &post).await?;
        info!(id = %saved.id, "Post saved to history");
        notice(notices, &format!("Saved as {}", saved.id))?;
    }

    Ok(post)
}

/// Generate a standalone image and write it to `out` (or a default file name).
///
/// Returns the path written.
#[instrument(skip(client, prompt))]
pub async fn generate_image<B: GenerationBackend>(
    client: &GenerationClient<B>,
    prompt: &str,
    aspect_ratio: AspectRatio,
    size: ImageSize,
    out: Option<PathBuf>,
) -> PostsmithResult<PathBuf> {
    let image = client.generate_image(prompt, aspect_ratio, size).await?;
    if image.downgraded {
        warn!(model = %image.model, "Used the standard image model; requested size ignored");
    }
    let path = out.unwrap_or_else(|| default_image_path(&image.value));
    write_image(&image.value, &path).await?;
    Ok(path)
}

fn default_image_path(image: &GeneratedImage) -> PathBuf {
    PathBuf::from(format!("postsmith-image.{}", image.extension()))
}

async fn write_image(image: &GeneratedImage, path: &Path) -> PostsmithResult<()> {
    tokio::fs::write(path, &image.data)
        .await
        .map_err(|e| OutputError::new(path.display().to_string(), e.to_string()))?;
    info!(path = %path.display(), bytes = image.data.len(), "Image written");
    Ok(())
}

fn notice(out: &mut impl Write, message: &str) -> PostsmithResult<()> {
    writeln!(out, "{}", message).map_err(|e| OutputError::new("stderr", e.to_string()))?;
    Ok(())
}
