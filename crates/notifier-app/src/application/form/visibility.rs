use tracing::debug;

use super::{FieldGroup, NotificationForm};

/// Show the group of the selected channel and mark its inputs required;
/// hide the other group and clear its required flags.
///
/// An unrecognized selection leaves the form untouched. Running it twice with
/// the same selection gives the same state.
pub fn toggle_channel_fields(form: &mut NotificationForm) {
    let Some(channel) = form.channel() else {
        debug!(
            selection = form.channel_selection(),
            "Unknown channel selection, visibility unchanged"
        );
        return;
    };

    let active = FieldGroup::for_channel(channel);
    let inactive = active.other();

    form.show_group(active);
    for id in inactive.fields() {
        form.set_required(*id, false);
    }
    for id in active.required_fields() {
        form.set_required(*id, true);
    }
}
