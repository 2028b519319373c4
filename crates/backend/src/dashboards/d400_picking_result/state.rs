use contracts::dashboards::d400_picking_result::{AggregationMode, ViewMode};

/// What the result screen currently shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayState {
    pub aggregation: AggregationMode,
    pub view: ViewMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayAction {
    SetAggregation(AggregationMode),
    SetViewMode(ViewMode),
}

impl DisplayState {
    pub fn reduce(self, action: DisplayAction) -> DisplayState {
        match action {
            DisplayAction::SetAggregation(aggregation) => DisplayState { aggregation, ..self },
            DisplayAction::SetViewMode(view) => DisplayState { view, ..self },
        }
    }

    /// Default state with the given selections applied
    pub fn from_selection(aggregation: Option<AggregationMode>, view: Option<ViewMode>) -> Self {
        let actions = aggregation
            .map(DisplayAction::SetAggregation)
            .into_iter()
            .chain(view.map(DisplayAction::SetViewMode));
        actions.fold(DisplayState::default(), DisplayState::reduce)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_order_table() {
        let state = DisplayState::default();
        assert_eq!(state.aggregation, AggregationMode::Order);
        assert_eq!(state.view, ViewMode::Table);
    }

    #[test]
    fn test_actions_change_one_field() {
        let state = DisplayState::default()
            .reduce(DisplayAction::SetViewMode(ViewMode::Bar))
            .reduce(DisplayAction::SetAggregation(AggregationMode::Worker));
        assert_eq!(state.aggregation, AggregationMode::Worker);
        assert_eq!(state.view, ViewMode::Bar);

        let state = state.reduce(DisplayAction::SetAggregation(AggregationMode::EachPick));
        assert_eq!(state.view, ViewMode::Bar);
    }

    #[test]
    fn test_from_selection() {
        let state = DisplayState::from_selection(Some(AggregationMode::EachPick), None);
        assert_eq!(state.aggregation, AggregationMode::EachPick);
        assert_eq!(state.view, ViewMode::Table);
    }
}
