use super::SpeculativeTarget;
use crate::domain_models::MutationId;
use crate::error::ThunkError;
use crate::store::Store;
use std::future::Future;
use std::marker::PhantomData;

/// One in-flight speculative change
///
/// Created by [`Transaction::begin`], which applies the patch. Must end in
/// [`commit`](Transaction::commit) or [`rollback`](Transaction::rollback);
/// a transaction dropped without either (its future was cancelled) reverts
/// quietly so no field stays owned forever.
pub struct Transaction<T: SpeculativeTarget> {
    store: Store,
    id: T::Id,
    mutation: MutationId,
    snapshot: Option<T::Patch>,
    _target: PhantomData<fn() -> T>,
}

impl<T: SpeculativeTarget> Transaction<T> {
    /// Capture the touched fields and apply `patch`
    pub fn begin(store: &Store, id: T::Id, entity: &T::Entity, patch: T::Patch) -> Self {
        let mutation = MutationId::next();
        let snapshot = T::capture(entity, &patch);
        log::debug!("Begin {} on {} {}", mutation, T::KIND, id);
        store.dispatch(T::apply(id.clone(), mutation, patch));

        Self {
            store: store.clone(),
            id,
            mutation,
            snapshot: Some(snapshot),
            _target: PhantomData,
        }
    }

    pub fn mutation(&self) -> MutationId {
        self.mutation
    }

    /// Keep the speculative values, overlaying any authoritative server fields
    pub fn commit(mut self, server_patch: Option<T::Patch>) {
        self.snapshot = None;
        log::debug!("Commit {} on {} {}", self.mutation, T::KIND, self.id);
        self.store
            .dispatch(T::commit(self.id.clone(), self.mutation, server_patch));
    }

    /// Restore the fields still owned, then record `error` on the slice
    pub fn rollback(mut self, error: &ThunkError) {
        if let Some(snapshot) = self.snapshot.take() {
            log::warn!(
                "Rolling back {} on {} {}: {}",
                self.mutation,
                T::KIND,
                self.id,
                error
            );
            self.store
                .dispatch(T::revert(self.id.clone(), self.mutation, snapshot));
            self.store.dispatch(T::fail(error.user_message()));
        }
    }
}

impl<T: SpeculativeTarget> Drop for Transaction<T> {
    fn drop(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            log::debug!("Abandoned {} on {} {}", self.mutation, T::KIND, self.id);
            self.store
                .dispatch(T::revert(self.id.clone(), self.mutation, snapshot));
        }
    }
}

/// Run one speculative mutation end to end
///
/// * `predict` - business rule computing the patch from the current entity
/// * `effect` - network call given the applied patch; resolves to the
///   thunk's value plus optional authoritative server fields to overlay
///   on commit
///
/// On failure the owned fields are already reverted and the slice error set.
pub async fn speculate<T, R, P, E, Fut>(
    store: &Store,
    id: T::Id,
    predict: P,
    effect: E,
) -> Result<R, ThunkError>
where
    T: SpeculativeTarget,
    P: FnOnce(&T::Entity) -> T::Patch,
    E: FnOnce(T::Patch) -> Fut,
    Fut: Future<Output = Result<(R, Option<T::Patch>), ThunkError>>,
{
    let entity = {
        let state = store.get_state();
        T::read(&state, &id).ok_or_else(|| ThunkError::NotFound(format!("{} {}", T::KIND, id)))?
    };

    let patch = predict(&entity);
    let transaction = Transaction::<T>::begin(store, id, &entity, patch.clone());

    match effect(patch).await {
        Ok((value, server_patch)) => {
            transaction.commit(server_patch);
            Ok(value)
        }
        Err(err) => {
            transaction.rollback(&err);
            Err(err)
        }
    }
}
