use super::SurfaceErrorAction;

pub(super) fn choose_surface_format(
    caps: &wgpu::SurfaceCapabilities,
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    let srgb = [wgpu::TextureFormat::Bgra8UnormSrgb, wgpu::TextureFormat::Rgba8UnormSrgb];
    if prefer_srgb {
        if let Some(f) = srgb.into_iter().find(|f| caps.formats.contains(f)) {
            return Some(f);
        }
    }
    caps.formats.first().copied()
}

pub(super) fn choose_alpha_mode(
    caps: &wgpu::SurfaceCapabilities,
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| caps.alpha_modes.contains(m))
        .or_else(|| caps.alpha_modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// Maps a surface error to an action; `reconfigure` runs for lost/outdated surfaces.
pub(super) fn classify_surface_error(
    err: wgpu::SurfaceError,
    reconfigure: impl FnOnce(),
) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
            reconfigure();
            SurfaceErrorAction::Reconfigured
        }
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lost_surface_is_reconfigured() {
        let mut ran = false;
        let action = classify_surface_error(wgpu::SurfaceError::Lost, || ran = true);
        assert_eq!(action, SurfaceErrorAction::Reconfigured);
        assert!(ran);
    }

    #[test]
    fn timeout_skips_and_oom_is_fatal() {
        let timeout = classify_surface_error(wgpu::SurfaceError::Timeout, || {});
        assert_eq!(timeout, SurfaceErrorAction::SkipFrame);
        let oom = classify_surface_error(wgpu::SurfaceError::OutOfMemory, || {});
        assert_eq!(oom, SurfaceErrorAction::Fatal);
    }
}
