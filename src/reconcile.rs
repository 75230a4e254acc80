use crate::error::{NameSet, SetMismatch};

/// Check that every video has a preview image and every preview image has a video
pub fn reconcile(videos: &NameSet, previews: &NameSet) -> Result<(), SetMismatch> {
    if videos == previews {
        return Ok(());
    }

    let need_preview: NameSet = videos.difference(previews).cloned().collect();
    let need_video: NameSet = previews.difference(videos).cloned().collect();

    let mismatch = match (need_preview.is_empty(), need_video.is_empty()) {
        (false, false) => SetMismatch::MissingBoth {
            videos: need_video,
            previews: need_preview,
        },
        (false, true) => SetMismatch::MissingPreviews(need_preview),
        // Sets differ, so at least one side is non-empty
        _ => SetMismatch::MissingVideos(need_video),
    };

    Err(mismatch)
}
