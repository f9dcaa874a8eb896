use std::sync::Arc;

use crate::auth::SessionGuard;
use crate::config::Settings;
use crate::content::{ManagedCollection, SingletonContent};
use crate::domain::{
    AboutContent, Achievement, CommitteeMember, ContentRecord, Event, GalleryAlbum, Minutes,
    Notice, Report, SiteSettings, Visit,
};
use crate::identity::IdentityProvider;
use crate::store::DocumentStore;
use crate::uploader::ObjectUploader;

#[derive(Clone)]
pub struct AppState {
    pub events: Arc<ManagedCollection<Event>>,
    pub notices: Arc<ManagedCollection<Notice>>,
    pub visits: Arc<ManagedCollection<Visit>>,
    pub committee: Arc<ManagedCollection<CommitteeMember>>,
    pub gallery: Arc<ManagedCollection<GalleryAlbum>>,
    pub achievements: Arc<ManagedCollection<Achievement>>,
    pub reports: Arc<ManagedCollection<Report>>,
    pub minutes: Arc<ManagedCollection<Minutes>>,
    pub site_settings: Arc<SingletonContent<SiteSettings>>,
    pub about: Arc<SingletonContent<AboutContent>>,
    pub guard: Arc<SessionGuard>,
    pub store: Arc<dyn DocumentStore>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        uploader: Arc<dyn ObjectUploader>,
        identity: Arc<dyn IdentityProvider>,
        settings: Arc<Settings>,
    ) -> Self {
        let guard = Arc::new(SessionGuard::new(
            Arc::clone(&store),
            identity,
            settings.auth.clone(),
        ));

        fn collection<T: ContentRecord>(
            store: &Arc<dyn DocumentStore>,
            uploader: &Arc<dyn ObjectUploader>,
        ) -> Arc<ManagedCollection<T>> {
            Arc::new(ManagedCollection::new(Arc::clone(store), Arc::clone(uploader)))
        }

        Self {
            events: collection(&store, &uploader),
            notices: collection(&store, &uploader),
            visits: collection(&store, &uploader),
            committee: collection(&store, &uploader),
            gallery: collection(&store, &uploader),
            achievements: collection(&store, &uploader),
            reports: collection(&store, &uploader),
            minutes: collection(&store, &uploader),
            site_settings: Arc::new(SingletonContent::new(
                Arc::clone(&store),
                Arc::clone(&uploader),
            )),
            about: Arc::new(SingletonContent::new(Arc::clone(&store), Arc::clone(&uploader))),
            guard,
            store,
            settings,
        }
    }
}

/// Compile-time binding from a content type to its slot in `AppState`,
/// so the admin CRUD handlers can be written once and instantiated per
/// type at route registration.
pub trait Collected: ContentRecord {
    fn collection(state: &AppState) -> &Arc<ManagedCollection<Self>>;
}

macro_rules! collected {
    ($ty:ty, $field:ident) => {
        impl Collected for $ty {
            fn collection(state: &AppState) -> &Arc<ManagedCollection<Self>> {
                &state.$field
            }
        }
    };
}

collected!(Event, events);
collected!(Notice, notices);
collected!(Visit, visits);
collected!(CommitteeMember, committee);
collected!(GalleryAlbum, gallery);
collected!(Achievement, achievements);
collected!(Report, reports);
collected!(Minutes, minutes);
