const THUMBNAIL_HOST: &str = "https://img.youtube.com/vi";

/// Highest-resolution cover image for a video.
///
/// The image host serves a lower resolution in its place when `maxresdefault`
/// was never generated, so the URL is not checked here.
pub fn thumbnail_url(video_id: Option<&str>) -> Option<String> {
    let id = video_id?;
    Some(format!("{THUMBNAIL_HOST}/{id}/maxresdefault.jpg"))
}
