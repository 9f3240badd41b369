use crate::models::generation::VideoStyle;

const REALISTIC_PREVIEW: &str =
    "https://assets.mixkit.co/videos/preview/mixkit-sunset-over-a-lake-1867-large.mp4";
const ANIME_PREVIEW: &str =
    "https://assets.mixkit.co/videos/preview/mixkit-anime-style-magic-sparkles-1412-large.mp4";
const CINEMATIC_PREVIEW: &str = "https://assets.mixkit.co/videos/preview/mixkit-aerial-view-of-a-road-going-through-a-forest-4152-large.mp4";
const ANIMATION_3D_PREVIEW: &str =
    "https://assets.mixkit.co/videos/preview/mixkit-geometric-abstract-animation-1612-large.mp4";
const ARTISTIC_PREVIEW: &str =
    "https://assets.mixkit.co/videos/preview/mixkit-ink-colors-in-water-artistic-1231-large.mp4";
const CARTOON_PREVIEW: &str = "https://assets.mixkit.co/videos/preview/mixkit-cartoon-character-running-in-a-forest-4150-large.mp4";

impl VideoStyle {
    /// Fixed preview clip shown in place of the generated video
    pub fn preview_url(&self) -> &'static str {
        match self {
            Self::Realistic => REALISTIC_PREVIEW,
            Self::Anime => ANIME_PREVIEW,
            Self::Cinematic => CINEMATIC_PREVIEW,
            Self::ThreeDAnimation => ANIMATION_3D_PREVIEW,
            Self::Artistic => ARTISTIC_PREVIEW,
            Self::Cartoon => CARTOON_PREVIEW,
        }
    }
}

/// Resolve a raw style tag to its preview clip; unknown tags get the realistic clip.
pub fn preview_url(style: Option<&str>) -> &'static str {
    VideoStyle::from_tag_or_default(style).preview_url()
}
