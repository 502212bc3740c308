use std::ops::{Deref, DerefMut};

use prost::Message;
use tracing::{debug, warn};

use crate::SerializerError;
use crate::proto::{Action, Api, Format, Options, PbfFieldSelector};

const NOTHING: PbfFieldSelector = PbfFieldSelector {
    options: false,
    trip: false,
    directions: false,
    status: false,
    matrix: false,
};

/// The substructures a caller most likely wants for the action when it didn't select any.
/// Returns `None` for actions that have no binary representation.
pub const fn default_field_selection(action: Action) -> Option<PbfFieldSelector> {
    match action {
        Action::Route | Action::Centroid | Action::OptimizedRoute | Action::TraceRoute => {
            Some(PbfFieldSelector {
                directions: true,
                ..NOTHING
            })
        }
        Action::TraceAttributes => Some(PbfFieldSelector {
            trip: true,
            ..NOTHING
        }),
        Action::Status => Some(PbfFieldSelector {
            status: true,
            ..NOTHING
        }),
        Action::SourcesToTargets => Some(PbfFieldSelector {
            matrix: true,
            ..NOTHING
        }),
        Action::NoAction
        | Action::Locate
        | Action::Isochrone
        | Action::Height
        | Action::TransitAvailable
        | Action::Expansion => None,
    }
}

/// Clears every top-level substructure the selection doesn't retain.
pub fn apply_field_selection(api: &mut Api, selection: &PbfFieldSelector) {
    if !selection.trip {
        api.trip = None;
    }
    if !selection.directions {
        api.directions = None;
    }
    if !selection.status {
        api.status = None;
    }
    if !selection.matrix {
        api.matrix = None;
    }
    // the selection may come from the options, they go last
    if !selection.options {
        api.options = None;
    }
}

/// Serializes the selected parts of the response into its protobuf representation.
///
/// Without an explicit field selection in the options the selection is inferred from the
/// action, failing with [`SerializerError::UnsupportedAction`] for actions that cannot be
/// represented. Unselected substructures are removed from `api`, except for the options of
/// internal service requests: handling continues after serialization and relies on them, so
/// they are only left out of the returned bytes.
pub fn serialize_pbf(api: &mut Api) -> Result<Vec<u8>, SerializerError> {
    let options = api.options.as_ref();
    let action = options.map(Options::action).unwrap_or_default();

    let selection = match options.and_then(|options| options.pbf_field_selector) {
        Some(selection) => selection,
        None => default_field_selection(action).ok_or_else(|| {
            warn!("Requested action {action} is not yet serializable as pbf");
            SerializerError::UnsupportedAction {
                action,
                format: Format::Pbf,
            }
        })?,
    };

    debug!("Serializing {action} with {selection:?}");

    if !selection.options && api.is_service() {
        let mut api = DetachedOptions::new(api);
        apply_field_selection(&mut api, &selection);
        return Ok(api.encode_to_vec());
    }

    apply_field_selection(api, &selection);
    Ok(api.encode_to_vec())
}

/// Takes the options out of the response for as long as it lives, putting them back when
/// dropped, whatever the exit path.
struct DetachedOptions<'a> {
    api: &'a mut Api,
    options: Option<Options>,
}

impl<'a> DetachedOptions<'a> {
    fn new(api: &'a mut Api) -> Self {
        let options = api.options.take();
        Self { api, options }
    }
}

impl Deref for DetachedOptions<'_> {
    type Target = Api;

    fn deref(&self) -> &Self::Target {
        &*self.api
    }
}

impl DerefMut for DetachedOptions<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.api
    }
}

impl Drop for DetachedOptions<'_> {
    fn drop(&mut self) {
        if let Some(options) = self.options.take() {
            self.api.options = Some(options);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::panic::{AssertUnwindSafe, catch_unwind};

    use strum::IntoEnumIterator;
    use test_log::test;

    use super::*;
    use crate::proto::{Directions, Info, Matrix, Status, Trip};

    fn full_api(action: Action) -> Api {
        let mut options = Options::default();
        options.set_action(action);
        options.set_format(Format::Pbf);

        Api {
            options: Some(options),
            trip: Some(Trip::default()),
            directions: Some(Directions::default()),
            status: Some(Status {
                version: "3.5.0".to_owned(),
                ..Default::default()
            }),
            info: Some(Info::default()),
            matrix: Some(Matrix::default()),
        }
    }

    #[test]
    fn default_field_selection_is_single_substructure() {
        for action in Action::iter() {
            let Some(selection) = default_field_selection(action) else {
                continue;
            };
            let selected = [
                selection.trip,
                selection.directions,
                selection.status,
                selection.matrix,
            ];
            assert_eq!(selected.iter().filter(|s| **s).count(), 1, "{action}");
            assert!(!selection.options, "{action}");
        }

        assert_eq!(default_field_selection(Action::Isochrone), None);
        assert_eq!(default_field_selection(Action::NoAction), None);
    }

    #[test]
    fn apply_field_selection_is_idempotent() {
        let selection = PbfFieldSelector {
            trip: true,
            matrix: true,
            ..NOTHING
        };

        let mut once = full_api(Action::Route);
        apply_field_selection(&mut once, &selection);

        let mut twice = once.clone();
        apply_field_selection(&mut twice, &selection);

        assert_eq!(once, twice);
        assert!(once.trip.is_some() && once.matrix.is_some());
        assert!(once.directions.is_none() && once.status.is_none() && once.options.is_none());
    }

    #[test]
    fn serialize_pbf_unsupported_action_leaves_response_untouched() {
        let mut api = full_api(Action::Locate);
        let expected = api.clone();

        assert_eq!(
            serialize_pbf(&mut api),
            Err(SerializerError::UnsupportedAction {
                action: Action::Locate,
                format: Format::Pbf,
            })
        );
        assert_eq!(api, expected);
    }

    #[test]
    fn serialize_pbf_explicit_selection() {
        let mut api = full_api(Action::Locate);
        if let Some(options) = api.options.as_mut() {
            options.pbf_field_selector = Some(PbfFieldSelector {
                options: true,
                status: true,
                ..NOTHING
            });
        }

        let bytes = serialize_pbf(&mut api).unwrap();
        let decoded = Api::decode(bytes.as_slice()).unwrap();
        assert!(decoded.options.is_some());
        assert!(decoded.status.is_some());
        assert!(decoded.trip.is_none() && decoded.directions.is_none());
        assert!(decoded.matrix.is_none());
    }

    #[test]
    fn detached_options_restored_on_unwind() {
        let mut api = full_api(Action::Route);
        let options = api.options.clone();

        let result = catch_unwind(AssertUnwindSafe(|| {
            let detached = DetachedOptions::new(&mut api);
            assert!(detached.api.options.is_none());
            panic!("serialization failed");
        }));

        assert!(result.is_err());
        assert_eq!(api.options, options);
    }
}
