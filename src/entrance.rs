use std::time::Duration;

const PANEL_STAGGER: Duration = Duration::from_millis(100);
const PANEL_DURATION: Duration = Duration::from_millis(600);
const PANEL_OFFSET_PX: i32 = 20;
const HEADER_DELAY: Duration = Duration::from_millis(200);
const HEADER_DURATION: Duration = Duration::from_millis(800);
const HEADER_OFFSET_PX: i32 = -20;

/// A fade/slide-in: opacity 0 to 1 and a vertical offset back to 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub delay: Duration,
    pub duration: Duration,
    pub offset_px: i32,
}

impl Transition {
    /// Inline CSS custom properties picked up by the page stylesheet.
    pub fn style(&self) -> String {
        format!(
            "--enter-delay: {}ms; --enter-duration: {}ms; --enter-offset: {}px;",
            self.delay.as_millis(),
            self.duration.as_millis(),
            self.offset_px
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrancePlan {
    pub header: Transition,
    pub panels: Vec<Transition>,
}

pub fn plan(panel_count: usize) -> EntrancePlan {
    let panels = (0..panel_count)
        .map(|index| Transition {
            delay: PANEL_STAGGER * u32::try_from(index).unwrap_or(u32::MAX),
            duration: PANEL_DURATION,
            offset_px: PANEL_OFFSET_PX,
        })
        .collect();

    EntrancePlan {
        header: Transition {
            delay: HEADER_DELAY,
            duration: HEADER_DURATION,
            offset_px: HEADER_OFFSET_PX,
        },
        panels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panels_are_staggered_by_index() {
        let plan = plan(3);
        let delays: Vec<u128> = plan.panels.iter().map(|t| t.delay.as_millis()).collect();
        assert_eq!(delays, vec![0, 100, 200]);
        assert!(plan.panels.iter().all(|t| t.offset_px == 20));
    }

    #[test]
    fn header_has_its_own_fixed_delay() {
        let plan = plan(0);
        assert!(plan.panels.is_empty());
        assert_eq!(plan.header.delay, Duration::from_millis(200));
        assert_eq!(plan.header.offset_px, -20);
    }

    #[test]
    fn style_renders_custom_properties() {
        let style = plan(2).panels[1].style();
        assert_eq!(
            style,
            "--enter-delay: 100ms; --enter-duration: 600ms; --enter-offset: 20px;"
        );
    }
}
