use divorce_prep::consultation::{
    ConsultationRepository, ConsultationService, ConsultationTicket, TicketId,
};
use divorce_prep::content::blog::{BlogPost, BlogRepository, BlogService, PostId};
use divorce_prep::session::SessionId;
use divorce_prep::store::RepositoryError;
use divorce_prep::tools::calculator::{
    CalculationId, CalculationRecord, CalculationRepository, ChildSupportService,
};
use divorce_prep::tools::diagnosis::{
    DiagnosisId, DiagnosisRecord, DiagnosisRepository, DiagnosisService,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Every domain service, wired to the in-memory adapters below.
#[derive(Clone)]
pub(crate) struct AppServices {
    pub(crate) calculator: Arc<ChildSupportService<InMemoryCalculationRepository>>,
    pub(crate) diagnosis: Arc<DiagnosisService<InMemoryDiagnosisRepository>>,
    pub(crate) blog: Arc<BlogService<InMemoryBlogRepository>>,
    pub(crate) consultations: Arc<ConsultationService<InMemoryConsultationRepository>>,
}

impl AppServices {
    pub(crate) fn in_memory() -> Self {
        Self {
            calculator: Arc::new(ChildSupportService::new(Arc::new(
                InMemoryCalculationRepository::default(),
            ))),
            diagnosis: Arc::new(DiagnosisService::new(Arc::new(
                InMemoryDiagnosisRepository::default(),
            ))),
            blog: Arc::new(BlogService::new(Arc::new(InMemoryBlogRepository::default()))),
            consultations: Arc::new(ConsultationService::new(Arc::new(
                InMemoryConsultationRepository::default(),
            ))),
        }
    }
}

/// Poisoned locks surface as `Unavailable`.
fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|err| RepositoryError::Unavailable(err.to_string()))
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryCalculationRepository {
    records: Arc<Mutex<HashMap<CalculationId, CalculationRecord>>>,
}

impl CalculationRepository for InMemoryCalculationRepository {
    fn insert(&self, record: CalculationRecord) -> Result<CalculationRecord, RepositoryError> {
        let mut guard = lock(&self.records)?;
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn by_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<CalculationRecord>, RepositoryError> {
        let guard = lock(&self.records)?;
        Ok(guard
            .values()
            .filter(|record| &record.session_id == session_id)
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryDiagnosisRepository {
    records: Arc<Mutex<HashMap<DiagnosisId, DiagnosisRecord>>>,
}

impl DiagnosisRepository for InMemoryDiagnosisRepository {
    fn insert(&self, record: DiagnosisRecord) -> Result<DiagnosisRecord, RepositoryError> {
        let mut guard = lock(&self.records)?;
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn by_session(&self, session_id: &SessionId) -> Result<Vec<DiagnosisRecord>, RepositoryError> {
        let guard = lock(&self.records)?;
        Ok(guard
            .values()
            .filter(|record| &record.session_id == session_id)
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryBlogRepository {
    posts: Arc<Mutex<HashMap<PostId, BlogPost>>>,
}

impl BlogRepository for InMemoryBlogRepository {
    fn insert(&self, post: BlogPost) -> Result<BlogPost, RepositoryError> {
        let mut guard = lock(&self.posts)?;
        if guard.contains_key(&post.id) || guard.values().any(|existing| existing.slug == post.slug)
        {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(post.id.clone(), post.clone());
        Ok(post)
    }

    fn update(&self, post: BlogPost) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.posts)?;
        if guard.contains_key(&post.id) {
            guard.insert(post.id.clone(), post);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn delete(&self, id: &PostId) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.posts)?;
        guard.remove(id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }

    fn fetch(&self, id: &PostId) -> Result<Option<BlogPost>, RepositoryError> {
        let guard = lock(&self.posts)?;
        Ok(guard.get(id).cloned())
    }

    fn fetch_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, RepositoryError> {
        let guard = lock(&self.posts)?;
        Ok(guard.values().find(|post| post.slug == slug).cloned())
    }

    fn list(&self) -> Result<Vec<BlogPost>, RepositoryError> {
        let guard = lock(&self.posts)?;
        Ok(guard.values().cloned().collect())
    }

    fn increment_views(&self, id: &PostId) -> Result<BlogPost, RepositoryError> {
        let mut guard = lock(&self.posts)?;
        let post = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        post.view_count += 1;
        Ok(post.clone())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryConsultationRepository {
    tickets: Arc<Mutex<HashMap<TicketId, ConsultationTicket>>>,
}

impl ConsultationRepository for InMemoryConsultationRepository {
    fn insert(&self, ticket: ConsultationTicket) -> Result<ConsultationTicket, RepositoryError> {
        let mut guard = lock(&self.tickets)?;
        if guard.contains_key(&ticket.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(ticket.id.clone(), ticket.clone());
        Ok(ticket)
    }

    fn update(&self, ticket: ConsultationTicket) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.tickets)?;
        if guard.contains_key(&ticket.id) {
            guard.insert(ticket.id.clone(), ticket);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &TicketId) -> Result<Option<ConsultationTicket>, RepositoryError> {
        let guard = lock(&self.tickets)?;
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<ConsultationTicket>, RepositoryError> {
        let guard = lock(&self.tickets)?;
        Ok(guard.values().cloned().collect())
    }
}
