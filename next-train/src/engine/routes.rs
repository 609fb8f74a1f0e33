//! Route intersection between two stops.

use crate::domain::RouteRef;

/// Routes serving both stops, in boarding order, each at most once.
///
/// ```
/// use next_train::domain::RouteRef;
/// use next_train::engine::common_routes;
///
/// let ids = |v: &[&str]| v.iter().map(|s| RouteRef::new(*s)).collect::<Vec<_>>();
///
/// assert_eq!(common_routes(&ids(&["A", "B", "C"]), &ids(&["C", "D"])), ids(&["C"]));
/// assert!(common_routes(&ids(&["A", "B"]), &ids(&["C"])).is_empty());
/// ```
pub fn common_routes(boarding: &[RouteRef], destination: &[RouteRef]) -> Vec<RouteRef> {
    let mut common: Vec<RouteRef> = Vec::new();
    for route in boarding {
        if destination.contains(route) && !common.contains(route) {
            common.push(route.clone());
        }
    }
    common
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn routes() -> impl Strategy<Value = Vec<RouteRef>> {
        prop::collection::vec("[A-E]", 0..8)
            .prop_map(|v| v.into_iter().map(RouteRef::new).collect())
    }

    proptest! {
        #[test]
        fn result_is_an_ordered_unique_subset(boarding in routes(), destination in routes()) {
            let common = common_routes(&boarding, &destination);

            for (i, route) in common.iter().enumerate() {
                prop_assert!(boarding.contains(route));
                prop_assert!(destination.contains(route));
                prop_assert!(!common[..i].contains(route));
            }

            // every shared route is present
            for route in &boarding {
                if destination.contains(route) {
                    prop_assert!(common.contains(route));
                }
            }

            // relative boarding order is preserved
            let positions: Vec<usize> = common
                .iter()
                .filter_map(|r| boarding.iter().position(|b| b == r))
                .collect();
            prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
