//! Placement of the toolbar and content surfaces inside the window.

/// Rectangle in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct SurfaceRects {
    pub chrome: Rect,
    pub content: Rect,
}

/// Toolbar strip across the top, content below it.
pub(super) fn split(width: f64, height: f64, toolbar_height: f64) -> SurfaceRects {
    let width = width.max(0.0);
    let height = height.max(0.0);
    let toolbar = toolbar_height.clamp(0.0, height);
    SurfaceRects {
        chrome: Rect {
            x: 0.0,
            y: 0.0,
            width,
            height: toolbar,
        },
        content: Rect {
            x: 0.0,
            y: toolbar,
            width,
            height: height - toolbar,
        },
    }
}

pub(super) fn to_wry(rect: &Rect) -> wry::Rect {
    wry::Rect {
        position: wry::dpi::Position::Logical(wry::dpi::LogicalPosition::new(rect.x, rect.y)),
        size: wry::dpi::Size::Logical(wry::dpi::LogicalSize::new(rect.width, rect.height)),
    }
}
